//! Inference backend abstraction.
//!
//! The trained forecasting model is an opaque, versioned artifact. This
//! module pins down the only two things the rest of the crate is allowed to
//! know about it: the input/output tensor shapes (a documented contract) and
//! a single blocking `predict` call. Handlers depend on the
//! [`InferenceBackend`] trait, never on a concrete implementation, which
//! keeps the unavailable/failure paths testable with plain test doubles.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "simulated-backend")]
pub mod simulated;

#[cfg(feature = "torch-backend")]
pub mod torch;

#[cfg(feature = "simulated-backend")]
pub use simulated::SimulatedBackend;

#[cfg(feature = "torch-backend")]
pub use torch::TorchBackend;

/// Shape of the model input: one batch of `sequence_length` hourly patches.
///
/// The full tensor is `(1, sequence_length, patch_height, patch_width,
/// channels)` of `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputShape {
    pub sequence_length: usize,
    pub patch_height: usize,
    pub patch_width: usize,
    pub channels: usize,
}

impl InputShape {
    /// Number of `f32` elements in one input tensor (batch size 1).
    pub fn element_count(&self) -> usize {
        self.sequence_length * self.patch_height * self.patch_width * self.channels
    }

    /// Batched tensor dimensions, batch axis first.
    pub fn dims(&self) -> [i64; 5] {
        [
            1,
            self.sequence_length as i64,
            self.patch_height as i64,
            self.patch_width as i64,
            self.channels as i64,
        ]
    }
}

/// Shape of the model output: one batch of `horizon_count` predicted patches.
///
/// The full tensor is `(1, horizon_count, patch_height, patch_width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputShape {
    pub horizon_count: usize,
    pub patch_height: usize,
    pub patch_width: usize,
}

impl OutputShape {
    /// Number of `f32` elements in one output tensor (batch size 1).
    pub fn element_count(&self) -> usize {
        self.horizon_count * self.patch_height * self.patch_width
    }

    /// Batched tensor dimensions, batch axis first.
    pub fn dims(&self) -> [i64; 4] {
        [
            1,
            self.horizon_count as i64,
            self.patch_height as i64,
            self.patch_width as i64,
        ]
    }
}

/// A flat, row-major input tensor together with its declared shape.
#[derive(Debug, Clone)]
pub struct InputTensor {
    pub shape: InputShape,
    pub data: Vec<f32>,
}

impl InputTensor {
    /// Build a uniformly random input tensor in `[0, 1)`.
    ///
    /// Stand-in for real observation data in simulated deployments; a
    /// production data path would fill the tensor from gridded observations
    /// instead.
    pub fn random(shape: InputShape) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..shape.element_count()).map(|_| rng.gen::<f32>()).collect();
        Self { shape, data }
    }
}

/// First batch element of the model output, flattened to plain nested arrays
/// of shape `[horizon_count][patch_height][patch_width]`.
pub type PredictionGrid = Vec<Vec<Vec<f32>>>;

/// Errors raised by an inference backend.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The model artifact could not be loaded at startup.
    #[error("failed to load model artifact: {0}")]
    Load(String),
    /// The caller handed over a tensor that does not match the input contract.
    #[error("input tensor has {got} elements, expected {expected}")]
    InputSize { got: usize, expected: usize },
    /// The artifact produced a tensor outside the documented output contract.
    #[error("unexpected model output shape: {0:?}")]
    OutputShape(Vec<i64>),
    /// The forward pass itself raised.
    #[error("model inference failed: {0}")]
    Forward(String),
}

/// A loaded forecasting model.
///
/// `predict` may block the calling thread for an arbitrary duration; callers
/// on an async runtime must isolate it (see
/// [`crate::http::handlers::predict`]). Implementations are shared read-only
/// across requests and must not mutate model state per call.
pub trait InferenceBackend: Send + Sync {
    /// Run one forward pass and return the first batch element.
    fn predict(&self, input: &InputTensor) -> Result<PredictionGrid, InferenceError>;

    /// The output contract this backend was loaded against.
    fn output_shape(&self) -> OutputShape;
}

/// Construct the backend selected by cargo features.
///
/// The torch backend wins when both features are enabled. Load failures are
/// reported, not panicked on: the server starts anyway and serves the
/// unavailable error (see `src/bin/server.rs`).
#[cfg(feature = "torch-backend")]
pub fn load_backend(
    config: &crate::config::ServiceConfig,
) -> Result<std::sync::Arc<dyn InferenceBackend>, InferenceError> {
    let path = config
        .model_path
        .as_deref()
        .ok_or_else(|| InferenceError::Load("MODEL_PATH not set".to_string()))?;
    let backend = TorchBackend::load(path, config.input_shape(), config.output_shape())?;
    Ok(std::sync::Arc::new(backend))
}

/// Construct the backend selected by cargo features.
#[cfg(all(feature = "simulated-backend", not(feature = "torch-backend")))]
pub fn load_backend(
    config: &crate::config::ServiceConfig,
) -> Result<std::sync::Arc<dyn InferenceBackend>, InferenceError> {
    Ok(std::sync::Arc::new(SimulatedBackend::new(
        config.output_shape(),
    )))
}

/// Construct the backend selected by cargo features.
#[cfg(not(any(feature = "torch-backend", feature = "simulated-backend")))]
pub fn load_backend(
    _config: &crate::config::ServiceConfig,
) -> Result<std::sync::Arc<dyn InferenceBackend>, InferenceError> {
    Err(InferenceError::Load(
        "no inference backend feature enabled".to_string(),
    ))
}

/// Reassemble a flat row-major output buffer into nested arrays.
pub(crate) fn grid_from_flat(flat: &[f32], shape: &OutputShape) -> PredictionGrid {
    debug_assert_eq!(flat.len(), shape.element_count());
    let plane = shape.patch_height * shape.patch_width;
    (0..shape.horizon_count)
        .map(|h| {
            (0..shape.patch_height)
                .map(|row| {
                    let base = h * plane + row * shape.patch_width;
                    flat[base..base + shape.patch_width].to_vec()
                })
                .collect()
        })
        .collect()
}
