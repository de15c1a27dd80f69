//! Password-reset links carry the session tokens in the URL fragment. With
//! hash routing the tokens sit behind the route fragment:
//!
//! ```text
//! https://app.example.com/#/reset-password#access_token=...&refresh_token=...
//! ```
//!
//! Only the segment after the final `#` holds the parameters.

use quill_core::TokenPair;

use reqwest::Url;

const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";

/// Extract the token pair from a reset link or a bare fragment.
///
/// Returns `None` unless both tokens are present and non-empty.
pub fn parse_reset_tokens(link: &str) -> Option<TokenPair> {
    let params = fragment_params(link);

    let find = |key: &str| {
        params
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    Some(TokenPair {
        access_token: find(ACCESS_TOKEN)?,
        refresh_token: find(REFRESH_TOKEN)?,
    })
}

/// The link with its token fragment removed and the route kept, e.g.
/// `.../#/reset-password#access_token=...` becomes `.../#/reset-password`.
/// Links without tokens come back unchanged.
pub fn strip_reset_tokens(link: &str) -> String {
    let carries_tokens = fragment_params(link)
        .iter()
        .any(|(k, _)| k == ACCESS_TOKEN || k == REFRESH_TOKEN);

    match link.rfind('#') {
        Some(index) if carries_tokens => link[..index].to_string(),
        _ => link.to_string(),
    }
}

fn fragment_params(link: &str) -> Vec<(String, String)> {
    let Some(index) = link.rfind('#') else {
        return Vec::new();
    };
    let fragment = &link[index + 1..];
    if fragment.is_empty() {
        return Vec::new();
    }

    // Borrow the URL parser's form decoding for the fragment.
    let Ok(mut scratch) = Url::parse("http://localhost/") else {
        return Vec::new();
    };
    scratch.set_query(Some(fragment));

    scratch
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
