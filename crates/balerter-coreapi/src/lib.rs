//! Balerter core API client
//!
//! Typed access to a Balerter server's HTTP API: alerts, datasource queries,
//! the key-value store, server-side logging, chart rendering, TLS inspection
//! and runtime info. Every call is one POST answered with a JSON envelope,
//! see [`transport`].
//!
//! ```no_run
//! # async fn demo() -> balerter_coreapi::Result<()> {
//! let api = balerter_coreapi::CoreApi::new("http://localhost:2000", "");
//! api.kv.upsert("last_run", "ok").await?;
//! let update = api.alert.error("db_down", "database is unreachable", None).await?;
//! println!("level changed: {}", update.level_was_updated);
//! # Ok(())
//! # }
//! ```

pub mod alert;
pub mod chart;
pub mod config;
pub mod datasource;
pub mod error;
pub mod io;
pub mod kv;
pub mod log;
mod query;
pub mod runtime;
pub mod tls;
pub mod transport;

pub use alert::{Alert, AlertLevel, AlertModule, AlertOptions, AlertUpdate};
pub use chart::{ChartModule, DataItem, DataSeries};
pub use config::{load_config, ClientConfig};
pub use datasource::{
    DatasourceModule, Direction, LokiDatasource, LokiQueryParams, LokiRangeParams,
    SqlDatasource, SqlEngine,
};
pub use error::{CoreApiError, Result};
pub use io::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use kv::KvModule;
pub use log::{LogLevel, LogModule};
pub use runtime::{RuntimeInfo, RuntimeModule};
pub use tls::{TlsInfo, TlsModule};
pub use transport::{Requester, Transport};

use std::sync::Arc;

/// Client for one Balerter server, grouping every endpoint module
#[derive(Clone)]
pub struct CoreApi {
    pub alert: AlertModule,
    pub chart: ChartModule,
    pub datasource: DatasourceModule,
    pub kv: KvModule,
    pub log: LogModule,
    pub runtime: RuntimeModule,
    pub tls: TlsModule,
}

impl CoreApi {
    /// Client for the server at `address`; an empty `auth_token` sends no `Authorization` header
    pub fn new(address: &str, auth_token: &str) -> Self {
        Self::with_http_client(
            &ClientConfig::new(address, auth_token),
            Arc::new(ReqwestHttpClient::new()),
        )
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http: Arc<dyn HttpClient> = match config.timeout() {
            Some(timeout) => Arc::new(ReqwestHttpClient::with_timeout(timeout)?),
            None => Arc::new(ReqwestHttpClient::new()),
        };
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self::with_requester(Arc::new(Transport::new(config, http)))
    }

    /// Build every module on top of an arbitrary request capability
    pub fn with_requester(requester: Arc<dyn Requester>) -> Self {
        Self {
            alert: AlertModule::new(Arc::clone(&requester)),
            chart: ChartModule::new(Arc::clone(&requester)),
            datasource: DatasourceModule::new(Arc::clone(&requester)),
            kv: KvModule::new(Arc::clone(&requester)),
            log: LogModule::new(Arc::clone(&requester)),
            runtime: RuntimeModule::new(Arc::clone(&requester)),
            tls: TlsModule::new(requester),
        }
    }
}
