//! Alert module: raise, resolve and inspect named alerts

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::Query;
use crate::transport::{decode_or_default, Requester, TEXT_PLAIN};
use crate::CoreApiError;

/// Alert level as used in the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn as_path(self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warn",
            AlertLevel::Error => "error",
        }
    }

    /// Numeric level stored by the server in [`Alert::level`]
    pub fn code(self) -> i32 {
        match self {
            AlertLevel::Success => 1,
            AlertLevel::Warning => 2,
            AlertLevel::Error => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(AlertLevel::Success),
            2 => Some(AlertLevel::Warning),
            3 => Some(AlertLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Optional delivery settings for an alert call.
///
/// Empty collections, `false`, `0` and empty strings are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertOptions {
    /// Channel names, sent comma-separated
    pub channels: Vec<String>,
    pub quiet: bool,
    pub repeat: u32,
    pub image: String,
    /// Extra fields, sent as `key:value` pairs joined by `,`
    pub fields: BTreeMap<String, String>,
    /// Escalation channels per level, sent as `level:ch1,ch2` groups joined by `;`
    pub escalate: BTreeMap<u32, Vec<String>>,
}

impl AlertOptions {
    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .text("channels", &self.channels.join(","))
            .flag("quiet", self.quiet)
            .number("repeat", i64::from(self.repeat))
            .text("image", &self.image);

        let fields = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join(",");
        query.text("fields", &fields);

        let escalate = self
            .escalate
            .iter()
            .map(|(level, channels)| format!("{}:{}", level, channels.join(",")))
            .collect::<Vec<_>>()
            .join(";");
        query.text("escalate", &escalate);

        query
    }
}

/// Alert state as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub name: String,
    pub level: i32,
    pub last_change: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub count: u64,
}

impl Alert {
    pub fn alert_level(&self) -> Option<AlertLevel> {
        AlertLevel::from_code(self.level)
    }
}

/// Result of a success/warning/error call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertUpdate {
    #[serde(default)]
    pub alert: Option<Alert>,
    #[serde(default)]
    pub level_was_updated: bool,
}

/// Client for the `alert/*` endpoints
#[derive(Clone)]
pub struct AlertModule {
    requester: Arc<dyn Requester>,
}

impl AlertModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    pub async fn success(
        &self,
        name: &str,
        message: &str,
        options: Option<&AlertOptions>,
    ) -> crate::Result<AlertUpdate> {
        self.send(AlertLevel::Success, name, message, options).await
    }

    pub async fn warning(
        &self,
        name: &str,
        message: &str,
        options: Option<&AlertOptions>,
    ) -> crate::Result<AlertUpdate> {
        self.send(AlertLevel::Warning, name, message, options).await
    }

    pub async fn error(
        &self,
        name: &str,
        message: &str,
        options: Option<&AlertOptions>,
    ) -> crate::Result<AlertUpdate> {
        self.send(AlertLevel::Error, name, message, options).await
    }

    /// Move alert `name` to `level`, attaching `message`
    pub async fn send(
        &self,
        level: AlertLevel,
        name: &str,
        message: &str,
        options: Option<&AlertOptions>,
    ) -> crate::Result<AlertUpdate> {
        let mut path = format!("alert/{}/{}", level.as_path(), name);
        if let Some(options) = options {
            path = options.query().append_to(&path);
        }

        let raw = self
            .requester
            .request(&path, TEXT_PLAIN, message.as_bytes().to_vec())
            .await
            .map_err(|e| CoreApiError::call(path.as_str(), e))?;

        decode_or_default(&raw).map_err(|source| CoreApiError::Unmarshal {
            what: "response",
            source,
        })
    }

    /// Fetch alert `name`; `None` when the server returns `null`
    pub async fn get(&self, name: &str) -> crate::Result<Option<Alert>> {
        let path = format!("alert/get/{}", name);

        let raw = self
            .requester
            .request(&path, "", Vec::new())
            .await
            .map_err(|e| CoreApiError::call(path.as_str(), e))?;

        serde_json::from_slice(&raw).map_err(|source| CoreApiError::Unmarshal {
            what: "response",
            source,
        })
    }
}
