//! # Nowcast Rust Backend
//!
//! Serving backend for a pretrained spatiotemporal forecasting model.
//!
//! This crate wraps a trained hourly forecasting model (an opaque, versioned
//! artifact) in a small REST API. Given a geographic bounding box it runs one
//! forward pass over a fixed-shape input patch and returns the predicted grid
//! together with the human-readable input/prediction time windows derived
//! from the sample's hour offset.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Sample window arithmetic and the time-window record
//! - [`inference`]: The [`inference::InferenceBackend`] trait plus the
//!   TorchScript and simulated implementations
//! - [`config`]: Environment-driven service configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! The model itself is loaded once at process start and shared read-only
//! across requests. If loading fails, the server still starts and reports the
//! failure on every request rather than crashing.

pub mod config;

pub mod inference;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
