use serde::Deserialize;

/// Query string for `GET /expand`
#[derive(Debug, Deserialize)]
pub struct ExpandQuery {
    pub url: Option<String>,
}

impl ExpandQuery {
    /// The requested URL, if present and not blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}
