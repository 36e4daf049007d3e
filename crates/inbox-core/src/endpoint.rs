use serde::{Deserialize, Serialize};
use url::Url;

/// Base address of the assistant backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds `{base}{path}` and appends the query pairs in order.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
