//! HTTP server module for the nowcast backend.
//!
//! This module provides an axum-based HTTP server that exposes the
//! prediction endpoint as a REST API. Handlers depend on the inference
//! backend only through the [`crate::inference::InferenceBackend`] trait
//! held in [`state::AppState`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and bound validation                   │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, tracing, error shaping                           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Domain (models::window)                                  │
//! │  - Sample window arithmetic                                │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Inference backend (inference::InferenceBackend)          │
//! │  - TorchBackend / SimulatedBackend                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;

pub mod router;

pub mod state;

pub mod error;

pub mod dto;

pub use router::create_router;

pub use state::AppState;
