//! Log module: write messages into the server's log

use std::sync::Arc;

use crate::transport::{Requester, TEXT_PLAIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Client for the `log/*` endpoints
#[derive(Clone)]
pub struct LogModule {
    requester: Arc<dyn Requester>,
}

impl LogModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    pub async fn error(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Error, message).await
    }

    pub async fn warn(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Warn, message).await
    }

    pub async fn info(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Info, message).await
    }

    pub async fn debug(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Debug, message).await
    }

    pub async fn send(&self, level: LogLevel, message: &str) -> crate::Result<()> {
        self.requester
            .request(
                &format!("log/{}", level.as_str()),
                TEXT_PLAIN,
                message.as_bytes().to_vec(),
            )
            .await?;
        Ok(())
    }
}
