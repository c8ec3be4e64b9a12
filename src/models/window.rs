//! Sample window arithmetic.
//!
//! A sample index is an hour offset from a fixed base date; this module maps
//! it to the human-readable input/prediction window boundaries returned to
//! the frontend.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Immutable sample window configuration.
///
/// A sample index is an hour offset from `base_date`; the model consumes
/// `sequence_length` hours of history and predicts `horizon_count` hours
/// ahead. Fixed at process start, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleWindowConfig {
    /// Hours of input history per sample.
    pub sequence_length: u32,
    /// Hours of prediction per sample.
    pub horizon_count: u32,
    /// Reference timestamp that sample index 0 maps to.
    pub base_date: NaiveDateTime,
}

/// Human-readable boundaries of one sample's input and prediction windows.
///
/// Derived entirely from a [`SampleWindowConfig`] and a sample index;
/// recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Time of day the input window starts at ("HH:MM:SS").
    #[serde(rename = "inputStart")]
    pub input_start: String,
    /// Time of day of the last input hour ("HH:MM:SS").
    #[serde(rename = "inputEnd")]
    pub input_end: String,
    /// Time of day the prediction window starts at ("HH:MM:SS").
    #[serde(rename = "predStart")]
    pub pred_start: String,
    /// Time of day of the last predicted hour ("HH:MM:SS").
    #[serde(rename = "predEnd")]
    pub pred_end: String,
    /// Calendar date of the input window start ("YYYY-MM-DD").
    pub date: String,
    /// Input window start as a combined timestamp ("YYYY-MM-DD HH:MM:SS").
    pub full_start_date: String,
}

/// Compute the time window for a sample index.
///
/// The input window spans hour offsets `[index, index + L - 1]` and the
/// prediction window `[index + L, index + L + H - 1]`, each offset added to
/// `base_date` as a whole-hour increment. By construction the prediction
/// window starts exactly one hour after the input window ends, so
/// `input_start <= input_end < pred_start <= pred_end` holds for any
/// non-negative index as long as `sequence_length >= 1` and
/// `horizon_count >= 1` (enforced at the configuration boundary, see
/// [`crate::config::ServiceConfig`]).
///
/// Pure and deterministic: identical inputs yield identical output.
pub fn sample_window(sample_index: u32, config: &SampleWindowConfig) -> TimeWindow {
    let input_start = config.base_date + Duration::hours(sample_index as i64);
    let input_end = input_start + Duration::hours(config.sequence_length as i64 - 1);
    let pred_start = input_start + Duration::hours(config.sequence_length as i64);
    let pred_end = pred_start + Duration::hours(config.horizon_count as i64 - 1);

    TimeWindow {
        input_start: input_start.format("%H:%M:%S").to_string(),
        input_end: input_end.format("%H:%M:%S").to_string(),
        pred_start: pred_start.format("%H:%M:%S").to_string(),
        pred_end: pred_end.format("%H:%M:%S").to_string(),
        date: input_start.format("%Y-%m-%d").to_string(),
        full_start_date: input_start.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
