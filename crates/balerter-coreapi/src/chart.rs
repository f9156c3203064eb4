//! Chart module: server-side rendering of time series into an image

use std::sync::Arc;

use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};

use crate::transport::{Requester, APPLICATION_JSON};
use crate::CoreApiError;

const RENDER_PATH: &str = "chart/render";

/// A single point of a series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataItem {
    #[serde(serialize_with = "compact_number")]
    pub timestamp: f64,
    #[serde(serialize_with = "compact_number")]
    pub value: f64,
}

/// Largest magnitude below which every whole `f64` is an exact integer (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole numbers are written without a fractional part (`10`, not `10.0`)
fn compact_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// One line of a chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSeries {
    pub color: String,
    pub line_color: String,
    pub point_color: String,
    pub data: Vec<DataItem>,
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    title: &'a str,
    series: &'a [DataSeries],
}

/// Client for the `chart/render` endpoint
#[derive(Clone)]
pub struct ChartModule {
    requester: Arc<dyn Requester>,
}

impl ChartModule {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// Render `series` under `title`, returning the raw image bytes
    pub async fn render(&self, title: &str, series: &[DataSeries]) -> crate::Result<Vec<u8>> {
        let payload =
            serde_json::to_vec(&RenderRequest { title, series }).map_err(CoreApiError::Marshal)?;

        let raw = self
            .requester
            .request(RENDER_PATH, APPLICATION_JSON, payload)
            .await
            .map_err(|e| CoreApiError::call(RENDER_PATH, e))?;

        let encoded: String =
            serde_json::from_slice(&raw).map_err(|source| CoreApiError::Unmarshal {
                what: "response",
                source,
            })?;

        let image = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        tracing::debug!("Rendered chart '{}' ({} bytes)", title, image.len());
        Ok(image)
    }
}
