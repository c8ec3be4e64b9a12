//! Domain model types for sample window arithmetic.

pub mod window;

pub use window::{sample_window, SampleWindowConfig, TimeWindow};
