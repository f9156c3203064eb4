//! Query-string construction shared by the endpoint modules
//!
//! Zero numbers and empty strings are skipped rather than encoded; the
//! remaining pairs are form-urlencoded in ascending key order.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub(crate) struct Query {
    params: BTreeMap<&'static str, String>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn text(&mut self, key: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.params.insert(key, value.to_string());
        }
        self
    }

    pub(crate) fn number(&mut self, key: &'static str, value: i64) -> &mut Self {
        if value != 0 {
            self.params.insert(key, value.to_string());
        }
        self
    }

    pub(crate) fn flag(&mut self, key: &'static str, value: bool) -> &mut Self {
        if value {
            self.params.insert(key, "true".to_string());
        }
        self
    }

    pub(crate) fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// `path?query`, or `path` unchanged when no parameter is set
    pub(crate) fn append_to(&self, path: &str) -> String {
        if self.params.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}
