use crate::{BackendClient, BackendError, BackendResult, EntryTable};

use quill_core::{EntryPatchRow, JournalEntryRow, NewEntryRow};

use async_trait::async_trait;
use log::debug;
use reqwest::Method;

/// Journal table exposed through the backend's REST interface.
pub struct HttpEntryTable {
    client: BackendClient,
    table: String,
}

impl HttpEntryTable {
    pub fn new(client: BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }
}

#[async_trait]
impl EntryTable for HttpEntryTable {
    async fn select_owned(&self, owner_id: &str) -> BackendResult<Vec<JournalEntryRow>> {
        let owner = format!("eq.{owner_id}");
        let token = self.client.access_token().await;
        let req = self.client.request(
            Method::GET,
            &self.path(),
            &[("select", "*"), ("user_id", owner.as_str()), ("order", "date.desc")],
            token.as_deref(),
        )?;

        let rows: Vec<JournalEntryRow> = self.client.execute(req).await?;
        debug!("Fetched {} rows from {}", rows.len(), self.table);
        Ok(rows)
    }

    async fn insert(&self, row: &NewEntryRow) -> BackendResult<JournalEntryRow> {
        let token = self.client.access_token().await;
        let req = self
            .client
            .request(Method::POST, &self.path(), &[], token.as_deref())?
            .header("Prefer", "return=representation")
            .json(row);

        let rows: Vec<JournalEntryRow> = self.client.execute(req).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::protocol("insert returned no rows"))
    }

    async fn update(&self, id: &str, patch: &EntryPatchRow) -> BackendResult<()> {
        let filter = format!("eq.{id}");
        let token = self.client.access_token().await;
        let req = self
            .client
            .request(Method::PATCH, &self.path(), &[("id", filter.as_str())], token.as_deref())?
            .header("Prefer", "return=minimal")
            .json(patch);

        self.client.send(req).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> BackendResult<()> {
        let filter = format!("eq.{id}");
        let token = self.client.access_token().await;
        let req = self
            .client
            .request(Method::DELETE, &self.path(), &[("id", filter.as_str())], token.as_deref())?;

        self.client.send(req).await?;
        Ok(())
    }
}
