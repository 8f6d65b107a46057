use std::time::Duration;

use url::Url;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Server root, optionally with a path prefix (`http://host/library`).
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Timeout for feedback requests. The push stream has no overall timeout.
    pub request_timeout: Duration,
    pub events_path: String,
    pub rating_path: String,
    pub reaction_path: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            events_path: "/similar/events".to_string(),
            rating_path: "/similar/feedback".to_string(),
            reaction_path: "/feedback".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
    }

    pub fn events_url(&self, query: &SearchQuery) -> Result<Url, url::ParseError> {
        let mut url = self.endpoint(&self.events_path)?;
        url.query_pairs_mut()
            .append_pair("file", &query.file)
            .append_pair("limit", &query.limit.to_string())
            .append_pair("exclude_same_author", bool_param(query.exclude_same_author))
            .append_pair("force", bool_param(query.force));
        Ok(url)
    }
}

/// Parameters of one similarity search, sent as the events query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub file: String,
    pub limit: u32,
    pub exclude_same_author: bool,
    pub force: bool,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: u32 = 50;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            limit: Self::DEFAULT_LIMIT,
            exclude_same_author: false,
            force: false,
        }
    }
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let settings = ClientSettings {
            base_url: "http://books.local/library/".to_string(),
            ..ClientSettings::default()
        };
        assert_eq!(
            settings.endpoint("/feedback").unwrap().as_str(),
            "http://books.local/library/feedback"
        );
    }

    #[test]
    fn events_url_encodes_query() {
        let settings = ClientSettings::default();
        let query = SearchQuery {
            file: "123 456.fb2".to_string(),
            limit: 20,
            exclude_same_author: true,
            force: false,
        };
        assert_eq!(
            settings.events_url(&query).unwrap().as_str(),
            "http://127.0.0.1:8000/similar/events?file=123+456.fb2&limit=20&exclude_same_author=true&force=false"
        );
    }
}
