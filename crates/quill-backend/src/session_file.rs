use crate::{BackendError, BackendResult};

use quill_core::Session;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// On-disk copy of the current session so a later process can restore it.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: Option<PathBuf>,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Keeps nothing between processes.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the stored session.
    ///
    /// A missing file and a corrupted file both read as `None`; corruption is
    /// logged and the file is left in place for inspection.
    pub fn load(&self) -> BackendResult<Option<Session>> {
        let Some(path) = self.path.as_ref() else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        let contents =
            fs::read_to_string(path).map_err(|e| BackendError::persistence(path.clone(), e))?;

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                info!("Restored session for user {}", session.user.id);
                Ok(Some(session))
            }
            Err(e) => {
                warn!("Session file corrupted at {path:?}: {e}");
                Ok(None)
            }
        }
    }

    /// Saves using temp file + fsync + rename so a crash never leaves a
    /// half-written session behind.
    pub fn save(&self, session: &Session) -> BackendResult<()> {
        let Some(final_path) = self.path.as_ref() else {
            return Ok(());
        };

        if let Some(parent) = final_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| BackendError::persistence(parent.into(), e))?;
        }

        let temp_path = final_path.with_extension(format!("tmp.{}", std::process::id()));
        let json = serde_json::to_string_pretty(session)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| BackendError::persistence(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| BackendError::persistence(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| BackendError::persistence(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BackendError::persistence(final_path.clone(), e)
        })?;

        Ok(())
    }

    pub fn clear(&self) -> BackendResult<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BackendError::persistence(path.clone(), e)),
        }
    }
}
