//! Runtime module: how the server process was started

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::transport::{decode_or_default, Requester};

/// Runtime settings reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeInfo {
    pub log_level: String,
    pub is_debug: bool,
    pub is_once: bool,
    pub with_script: String,
    pub config_source: String,
    pub safe_mode: bool,
}

/// Client for the `runtime/get` endpoint
#[derive(Clone)]
pub struct RuntimeModule {
    requester: Arc<dyn Requester>,
}

impl RuntimeModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    pub async fn get(&self) -> crate::Result<RuntimeInfo> {
        let raw = self.requester.request("runtime/get", "", Vec::new()).await?;
        Ok(decode_or_default(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockRequester;
    use crate::CoreApiError;

    #[tokio::test]
    async fn get_decodes_runtime_info() {
        let mut mock = MockRequester::new();
        mock.expect_request()
            .withf(|path, content_type, body| {
                path == "runtime/get" && content_type.is_empty() && body.is_empty()
            })
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(br#"{"log_level":"debug","is_debug":true,"is_once":false,"with_script":"a.lua","config_source":"config.yml","safe_mode":true}"#.to_vec())
                })
            });

        let info = RuntimeModule::new(Arc::new(mock)).get().await.unwrap();
        assert_eq!(
            info,
            RuntimeInfo {
                log_level: "debug".to_string(),
                is_debug: true,
                is_once: false,
                with_script: "a.lua".to_string(),
                config_source: "config.yml".to_string(),
                safe_mode: true,
            }
        );
    }

    #[tokio::test]
    async fn get_tolerates_missing_fields() {
        let mut mock = MockRequester::new();
        mock.expect_request()
            .returning(|_, _, _| Box::pin(async { Ok(br#"{"log_level":"info"}"#.to_vec()) }));

        let info = RuntimeModule::new(Arc::new(mock)).get().await.unwrap();
        assert_eq!(info.log_level, "info");
        assert!(!info.safe_mode);
    }

    #[tokio::test]
    async fn get_null_result_is_default() {
        let mut mock = MockRequester::new();
        mock.expect_request()
            .returning(|_, _, _| Box::pin(async { Ok(b"null".to_vec()) }));

        let info = RuntimeModule::new(Arc::new(mock)).get().await.unwrap();
        assert_eq!(info, RuntimeInfo::default());
    }

    #[tokio::test]
    async fn get_malformed_result_is_decode_error() {
        let mut mock = MockRequester::new();
        mock.expect_request()
            .returning(|_, _, _| Box::pin(async { Ok(b"bad".to_vec()) }));

        let err = RuntimeModule::new(Arc::new(mock)).get().await.unwrap_err();
        assert!(matches!(err, CoreApiError::Json(_)), "{err:?}");
    }

    #[tokio::test]
    async fn get_returns_call_error_unwrapped() {
        let mut mock = MockRequester::new();
        mock.expect_request().returning(|_, _, _| {
            Box::pin(async { Err(CoreApiError::Server("err1".to_string())) })
        });

        let err = RuntimeModule::new(Arc::new(mock)).get().await.unwrap_err();
        assert_eq!(err.to_string(), "err1");
    }
}
