//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The wire field names (`latMin`, `prediction_results`, ...) are fixed by
//! the existing frontend contract.

use serde::{Deserialize, Serialize};

use crate::inference::PredictionGrid;
use crate::models::TimeWindow;

/// Request body for the prediction endpoint.
///
/// Bounds are carried as raw JSON values so validation can name every
/// malformed field instead of failing on the first deserialization error.
/// Numeric strings are accepted alongside JSON numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Southern latitude bound
    #[serde(rename = "latMin", default)]
    pub lat_min: Option<serde_json::Value>,
    /// Western longitude bound
    #[serde(rename = "lonMin", default)]
    pub lon_min: Option<serde_json::Value>,
    /// Northern latitude bound
    #[serde(rename = "latMax", default)]
    pub lat_max: Option<serde_json::Value>,
    /// Eastern longitude bound
    #[serde(rename = "lonMax", default)]
    pub lon_max: Option<serde_json::Value>,
    /// Hour offset of the sample to predict for; falls back to the
    /// configured default when absent
    #[serde(rename = "sampleIndex", default)]
    pub sample_index: Option<u32>,
}

/// Validated geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl PredictRequest {
    /// Validate the bounding box, naming every missing or non-numeric field.
    pub fn bounds(&self) -> Result<BoundingBox, String> {
        let mut malformed: Vec<&str> = Vec::new();
        let mut field = |value: &Option<serde_json::Value>, name: &'static str| -> f64 {
            match value.as_ref().and_then(coerce_float) {
                Some(v) => v,
                None => {
                    malformed.push(name);
                    f64::NAN
                }
            }
        };

        let bounds = BoundingBox {
            lat_min: field(&self.lat_min, "latMin"),
            lon_min: field(&self.lon_min, "lonMin"),
            lat_max: field(&self.lat_max, "latMax"),
            lon_max: field(&self.lon_max, "lonMax"),
        };

        if malformed.is_empty() {
            Ok(bounds)
        } else {
            Err(format!(
                "missing or non-numeric field(s): {}",
                malformed.join(", ")
            ))
        }
    }
}

/// Coerce a JSON value to a float the way the frontend sends bounds: either
/// a JSON number or a numeric string.
fn coerce_float(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Response body for the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted grid, shape `[horizon_count][patch_height][patch_width]`
    pub prediction_results: PredictionGrid,
    /// Input/prediction window boundaries for the sample
    pub time_details: TimeWindow,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Inference backend status ("loaded" or "unavailable")
    pub backend: String,
}
