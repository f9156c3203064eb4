//! Datasource module: run queries against datasources configured on the server
//!
//! Results are returned exactly as the server encoded them; the shape depends
//! on the datasource, so decoding is left to the caller.

use std::sync::Arc;

use crate::query::Query;
use crate::transport::{Requester, TEXT_PLAIN};
use crate::CoreApiError;

/// SQL-like engines sharing the plain `query` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlEngine {
    MySql,
    Postgres,
    Clickhouse,
}

impl SqlEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            SqlEngine::MySql => "mysql",
            SqlEngine::Postgres => "postgres",
            SqlEngine::Clickhouse => "clickhouse",
        }
    }
}

impl std::fmt::Display for SqlEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry point for the `datasource/*` endpoints
#[derive(Clone)]
pub struct DatasourceModule {
    requester: Arc<dyn Requester>,
}

impl DatasourceModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// Handle to the mysql datasource `name`
    pub fn mysql(&self, name: &str) -> SqlDatasource {
        self.sql(SqlEngine::MySql, name)
    }

    /// Handle to the postgres datasource `name`
    pub fn postgres(&self, name: &str) -> SqlDatasource {
        self.sql(SqlEngine::Postgres, name)
    }

    /// Handle to the clickhouse datasource `name`
    pub fn clickhouse(&self, name: &str) -> SqlDatasource {
        self.sql(SqlEngine::Clickhouse, name)
    }

    pub fn sql(&self, engine: SqlEngine, name: &str) -> SqlDatasource {
        SqlDatasource {
            requester: Arc::clone(&self.requester),
            engine,
            name: name.to_string(),
        }
    }

    /// Handle to the loki datasource `name`
    pub fn loki(&self, name: &str) -> LokiDatasource {
        LokiDatasource {
            requester: Arc::clone(&self.requester),
            name: name.to_string(),
        }
    }
}

/// A named MySQL, Postgres or Clickhouse datasource
#[derive(Clone)]
pub struct SqlDatasource {
    requester: Arc<dyn Requester>,
    engine: SqlEngine,
    name: String,
}

impl SqlDatasource {
    pub fn engine(&self) -> SqlEngine {
        self.engine
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn query(&self, query: &str) -> crate::Result<Vec<u8>> {
        let path = format!("datasource/{}/{}/query", self.engine, self.name);
        self.requester
            .request(&path, TEXT_PLAIN, query.as_bytes().to_vec())
            .await
            .map_err(|e| CoreApiError::call(format!("{}.query", self.engine), e))
    }
}

/// Sort order of Loki log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Parameters of an instant Loki query; zero values are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LokiQueryParams {
    pub limit: u32,
    pub time: i64,
    pub direction: Option<Direction>,
}

impl LokiQueryParams {
    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .number("limit", i64::from(self.limit))
            .number("time", self.time)
            .text("direction", self.direction.map_or("", Direction::as_str));
        query
    }
}

/// Parameters of a Loki range query; zero values are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LokiRangeParams {
    pub limit: u32,
    pub start: i64,
    pub end: i64,
    pub step: i64,
    pub direction: Option<Direction>,
}

impl LokiRangeParams {
    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .number("limit", i64::from(self.limit))
            .number("start", self.start)
            .number("end", self.end)
            .number("step", self.step)
            .text("direction", self.direction.map_or("", Direction::as_str));
        query
    }
}

/// A named Loki datasource
#[derive(Clone)]
pub struct LokiDatasource {
    requester: Arc<dyn Requester>,
    name: String,
}

impl LokiDatasource {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn query(
        &self,
        query: &str,
        params: Option<&LokiQueryParams>,
    ) -> crate::Result<Vec<u8>> {
        let mut path = format!("datasource/loki/{}/query", self.name);
        if let Some(params) = params {
            path = params.query().append_to(&path);
        }
        self.requester
            .request(&path, TEXT_PLAIN, query.as_bytes().to_vec())
            .await
            .map_err(|e| CoreApiError::call("loki.query", e))
    }

    pub async fn range(
        &self,
        query: &str,
        params: Option<&LokiRangeParams>,
    ) -> crate::Result<Vec<u8>> {
        let mut path = format!("datasource/loki/{}/range", self.name);
        if let Some(params) = params {
            path = params.query().append_to(&path);
        }
        self.requester
            .request(&path, TEXT_PLAIN, query.as_bytes().to_vec())
            .await
            .map_err(|e| CoreApiError::call("loki.range", e))
    }
}
