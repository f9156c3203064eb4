//! TLS module: inspect the certificates a host presents

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::transport::{decode_or_default, Requester, TEXT_PLAIN};
use crate::CoreApiError;

const GET_PATH: &str = "tls/get";

/// One certificate of the chain presented by a host
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TlsInfo {
    #[serde(default)]
    pub issuer: String,
    /// Expiry as Unix seconds
    #[serde(default)]
    pub expiry: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dns_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email_addresses: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client for the `tls/get` endpoint
#[derive(Clone)]
pub struct TlsModule {
    requester: Arc<dyn Requester>,
}

impl TlsModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// Certificates for `hostname`, given without scheme or port
    pub async fn get(&self, hostname: &str) -> crate::Result<Vec<TlsInfo>> {
        let raw = self
            .requester
            .request(GET_PATH, TEXT_PLAIN, hostname.as_bytes().to_vec())
            .await
            .map_err(|e| CoreApiError::call(GET_PATH, e))?;

        decode_or_default(&raw).map_err(|source| CoreApiError::Unmarshal {
            what: "tls info",
            source,
        })
    }
}
