//! KV module: the server's key-value storage

use std::collections::HashMap;
use std::sync::Arc;

use crate::transport::{decode_or_default, Requester, TEXT_PLAIN};

/// Client for the `kv/*` endpoints
#[derive(Clone)]
pub struct KvModule {
    requester: Arc<dyn Requester>,
}

impl KvModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// Store a new value; the server rejects keys that already exist
    pub async fn put(&self, key: &str, value: &str) -> crate::Result<()> {
        self.requester
            .request(&format!("kv/put/{}", key), TEXT_PLAIN, value.as_bytes().to_vec())
            .await?;
        Ok(())
    }

    /// Store a value, replacing any existing one
    pub async fn upsert(&self, key: &str, value: &str) -> crate::Result<()> {
        self.requester
            .request(
                &format!("kv/upsert/{}", key),
                TEXT_PLAIN,
                value.as_bytes().to_vec(),
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> crate::Result<()> {
        self.requester
            .request(&format!("kv/delete/{}", key), "", Vec::new())
            .await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> crate::Result<String> {
        let raw = self
            .requester
            .request(&format!("kv/get/{}", key), "", Vec::new())
            .await?;
        Ok(decode_or_default(&raw)?)
    }

    pub async fn all(&self) -> crate::Result<HashMap<String, String>> {
        let raw = self.requester.request("kv/all", "", Vec::new()).await?;
        Ok(decode_or_default(&raw)?)
    }
}
