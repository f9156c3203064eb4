//! Transport core
//!
//! Every call is a POST to `{address}/{path}`. The server wraps each answer in
//! an envelope `{"status": "success"|"error", "error": ..., "result": ...}`;
//! [`Transport`] unwraps it and hands the still-encoded `result` back to the
//! endpoint module that made the call.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use crate::config::{normalize_address, ClientConfig};
use crate::io::HttpClient;
use crate::CoreApiError;

pub(crate) const TEXT_PLAIN: &str = "text/plain";
pub(crate) const APPLICATION_JSON: &str = "application/json";

const STATUS_ERROR: &str = "error";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: String,
    #[serde(default, deserialize_with = "present_raw")]
    result: Option<Box<RawValue>>,
}

/// `None` only when `result` is absent; a literal `null` is kept as raw JSON
fn present_raw<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

/// Decode a raw result, reading `null` as the type's empty value
pub(crate) fn decode_or_default<T>(raw: &[u8]) -> serde_json::Result<T>
where
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_slice::<Option<T>>(raw)?.unwrap_or_default())
}

/// The request capability shared by all endpoint modules
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Requester: Send + Sync {
    /// POST `body` to `path` and return the raw JSON `result` of the envelope.
    ///
    /// An empty `content_type` sends no `Content-Type` header.
    async fn request(
        &self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> crate::Result<Vec<u8>>;
}

/// HTTP transport to a Balerter server
pub struct Transport {
    address: String,
    auth_token: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("address", &self.address)
            .finish()
    }
}

impl Transport {
    pub fn new(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        let address = normalize_address(&config.address);
        tracing::debug!(
            "Created Transport for {} (auth: {})",
            address,
            !config.auth_token.is_empty()
        );

        Self {
            address,
            auth_token: config.auth_token.clone(),
            http,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl Requester for Transport {
    async fn request(
        &self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> crate::Result<Vec<u8>> {
        let url = format!("{}/{}", self.address, path);

        let mut headers = Vec::with_capacity(2);
        if !content_type.is_empty() {
            headers.push(("Content-Type", content_type));
        }
        if !self.auth_token.is_empty() {
            headers.push(("Authorization", self.auth_token.as_str()));
        }

        let response = self.http.post(&url, &headers, body).await?;

        let envelope: ApiResponse =
            serde_json::from_slice(&response.body).map_err(CoreApiError::DecodeResponse)?;

        if envelope.status == STATUS_ERROR {
            tracing::debug!("Server reported error for {}: {}", path, envelope.error);
            return Err(CoreApiError::Server(envelope.error));
        }

        Ok(envelope
            .result
            .map(|raw| raw.get().as_bytes().to_vec())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{HttpResponse, MockHttpClient};

    fn respond(body: &'static str) -> MockHttpClient {
        let mut mock = MockHttpClient::new();
        mock.expect_post().returning(move |_, _, _| {
            Box::pin(async move {
                Ok(HttpResponse {
                    status: 200,
                    body: body.as_bytes().to_vec(),
                })
            })
        });
        mock
    }

    fn transport(token: &str, http: MockHttpClient) -> Transport {
        Transport::new(&ClientConfig::new("http://server/", token), Arc::new(http))
    }

    #[test]
    fn address_is_normalized() {
        let config = ClientConfig {
            address: "/a//".to_string(),
            auth_token: "t".to_string(),
            auth_token_env: None,
            timeout_seconds: None,
        };
        let transport = Transport::new(&config, Arc::new(MockHttpClient::new()));
        assert_eq!(transport.address(), "a");
    }

    #[test]
    fn debug_hides_token() {
        let transport = transport("very-secret", MockHttpClient::new());
        let debug = format!("{:?}", transport);
        assert!(!debug.contains("very-secret"), "{debug}");
    }

    #[tokio::test]
    async fn request_returns_raw_result() {
        let mut mock = MockHttpClient::new();
        mock.expect_post()
            .withf(|url, headers, body| {
                url == "http://server/foo"
                    && headers.contains(&("Content-Type", "text"))
                    && headers.contains(&("Authorization", "t"))
                    && body.as_slice() == b"body"
            })
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: br#"{"status":"success","result":"foobar"}"#.to_vec(),
                    })
                })
            });

        let result = transport("t", mock)
            .request("foo", "text", b"body".to_vec())
            .await
            .unwrap();
        assert_eq!(result, br#""foobar""#.to_vec());
    }

    #[tokio::test]
    async fn request_keeps_nested_result_encoded() {
        let result = transport(
            "",
            respond(r#"{"status":"success","result":{"a": [1, 2]}}"#),
        )
        .request("foo", "", Vec::new())
        .await
        .unwrap();
        assert_eq!(result, br#"{"a": [1, 2]}"#.to_vec());
    }

    #[tokio::test]
    async fn request_omits_empty_headers() {
        let mut mock = MockHttpClient::new();
        mock.expect_post()
            .withf(|_, headers, body| headers.is_empty() && body.is_empty())
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: br#"{"status":"success"}"#.to_vec(),
                    })
                })
            });

        let result = transport("", mock)
            .request("kv/all", "", Vec::new())
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn request_surfaces_transport_error_unchanged() {
        let mut mock = MockHttpClient::new();
        mock.expect_post()
            .returning(|_, _, _| Box::pin(async { Err(CoreApiError::Http("err1".to_string())) }));

        let err = transport("t", mock)
            .request("foo", "text", b"body".to_vec())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "err1");
        assert!(matches!(err, CoreApiError::Http(_)));
    }

    #[tokio::test]
    async fn request_fails_on_malformed_envelope() {
        let err = transport("t", respond("bad"))
            .request("foo", "text", b"body".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreApiError::DecodeResponse(_)), "{err:?}");
        assert!(err.to_string().starts_with("error decode response: expected value"));
    }

    #[tokio::test]
    async fn request_surfaces_server_error_verbatim() {
        let err = transport("t", respond(r#"{"status":"error","error":"boom"}"#))
            .request("foo", "text", b"body".to_vec())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn request_keeps_null_result() {
        let result = transport("", respond(r#"{"status":"success","result":null}"#))
            .request("alert/get/a", "", Vec::new())
            .await
            .unwrap();
        assert_eq!(result, b"null".to_vec());
    }

    #[test]
    fn decode_or_default_reads_null_as_empty() {
        let values: Vec<String> = decode_or_default(b"null").unwrap();
        assert!(values.is_empty());
        let value: String = decode_or_default(br#""v""#).unwrap();
        assert_eq!(value, "v");
        assert!(decode_or_default::<String>(b"").is_err());
    }

    #[tokio::test]
    async fn request_ignores_http_status() {
        let mut mock = MockHttpClient::new();
        mock.expect_post().returning(|_, _, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 500,
                    body: br#"{"status":"success","result":1}"#.to_vec(),
                })
            })
        });

        let result = transport("", mock)
            .request("foo", "", Vec::new())
            .await
            .unwrap();
        assert_eq!(result, b"1".to_vec());
    }
}
