//! Service configuration and environment variable handling.

use std::env;

use chrono::NaiveDateTime;

use crate::inference::{InputShape, OutputShape};
use crate::models::SampleWindowConfig;

/// Service configuration loaded from environment variables.
///
/// All values are fixed at process start. The tensor shape fields are the
/// documented contract of the trained artifact and must match the model
/// version being served.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Server bind host
    pub host: String,
    /// Server bind port
    pub port: u16,
    /// Path to the TorchScript model artifact (unused by the simulated backend)
    pub model_path: Option<String>,
    /// Hours of input history consumed per sample
    pub sequence_length: u32,
    /// Hours of prediction produced per sample
    pub horizon_count: u32,
    /// Spatial patch height consumed by the model
    pub patch_height: usize,
    /// Spatial patch width consumed by the model
    pub patch_width: usize,
    /// Channels per grid cell in the input
    pub channels: usize,
    /// Reference timestamp that sample index 0 maps to
    pub base_date: NaiveDateTime,
    /// Sample index used when a request does not carry one
    pub default_sample_index: u32,
}

impl ServiceConfig {
    /// Create a new service configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0): Server bind host
    /// - `PORT` (optional, default: 8080): Server bind port
    /// - `MODEL_PATH` (optional): TorchScript artifact path; required when
    ///   running with the `torch-backend` feature
    /// - `SEQ_LEN` (optional, default: 6): Hours of input history
    /// - `HORIZONS` (optional, default: 3): Hours of prediction
    /// - `PATCH_HEIGHT` (optional, default: 13): Patch height
    /// - `PATCH_WIDTH` (optional, default: 13): Patch width
    /// - `CHANNELS` (optional, default: 7): Input channels per cell
    /// - `BASE_DATE` (optional, default: 2015-01-01T00:00:00): Reference
    ///   timestamp for sample index 0, `YYYY-MM-DDTHH:MM:SS`
    /// - `SAMPLE_INDEX` (optional, default: 17): Fallback sample index for
    ///   requests that do not specify one
    ///
    /// # Errors
    /// Returns an error if a variable is set but malformed, or if a window or
    /// shape dimension is zero.
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid port number".to_string())?;
        let model_path = env::var("MODEL_PATH").ok();

        let sequence_length = parse_dim("SEQ_LEN", 6)?;
        let horizon_count = parse_dim("HORIZONS", 3)?;
        let patch_height = parse_dim("PATCH_HEIGHT", 13)? as usize;
        let patch_width = parse_dim("PATCH_WIDTH", 13)? as usize;
        let channels = parse_dim("CHANNELS", 7)? as usize;

        let base_date = match env::var("BASE_DATE") {
            Ok(raw) => NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
                .map_err(|e| format!("BASE_DATE must be YYYY-MM-DDTHH:MM:SS: {e}"))?,
            Err(_) => default_base_date(),
        };

        let default_sample_index = env::var("SAMPLE_INDEX")
            .unwrap_or_else(|_| "17".to_string())
            .parse()
            .map_err(|_| "SAMPLE_INDEX must be a non-negative integer".to_string())?;

        Ok(Self {
            host,
            port,
            model_path,
            sequence_length,
            horizon_count,
            patch_height,
            patch_width,
            channels,
            base_date,
            default_sample_index,
        })
    }

    /// Window configuration slice of this config.
    pub fn window(&self) -> SampleWindowConfig {
        SampleWindowConfig {
            sequence_length: self.sequence_length,
            horizon_count: self.horizon_count,
            base_date: self.base_date,
        }
    }

    /// Input tensor contract of the served model.
    pub fn input_shape(&self) -> InputShape {
        InputShape {
            sequence_length: self.sequence_length as usize,
            patch_height: self.patch_height,
            patch_width: self.patch_width,
            channels: self.channels,
        }
    }

    /// Output tensor contract of the served model.
    pub fn output_shape(&self) -> OutputShape {
        OutputShape {
            horizon_count: self.horizon_count as usize,
            patch_height: self.patch_height,
            patch_width: self.patch_width,
        }
    }
}

impl Default for ServiceConfig {
    /// Defaults mirror the deployment the model was trained for: 6 input
    /// hours, 3 prediction hours, 13x13x7 patches, hourly offsets from
    /// 2015-01-01 00:00:00.
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            model_path: None,
            sequence_length: 6,
            horizon_count: 3,
            patch_height: 13,
            patch_width: 13,
            channels: 7,
            base_date: default_base_date(),
            default_sample_index: 17,
        }
    }
}

fn default_base_date() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2015, 1, 1)
        .expect("valid hard-coded date")
        .and_hms_opt(0, 0, 0)
        .expect("valid hard-coded time")
}

/// Parse a dimension variable, rejecting zero: every window and patch
/// dimension must be at least 1 for the offset arithmetic to hold.
fn parse_dim(name: &str, default: u32) -> Result<u32, String> {
    let value: u32 = match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{name} must be a positive integer"))?,
        Err(_) => default,
    };
    if value == 0 {
        return Err(format!("{name} must be at least 1"));
    }
    Ok(value)
}
