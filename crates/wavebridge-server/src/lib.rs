//! `wavebridge-server` – the gesture ingestion server and decision pipeline.
//!
//! # Modules
//!
//! - [`pipeline`] – [`BridgePipeline`][pipeline::BridgePipeline]: drives one
//!   payload through decode → intent → obstacle fetch → arbitration →
//!   dispatch, applying the per-stage failure policy.
//! - [`server`] – [`GestureServer`][server::GestureServer]: the strictly
//!   sequential accept-read-process-close TCP loop.
//! - [`telemetry`] – `tracing` subscriber setup with optional OTLP export.

pub mod pipeline;
pub mod server;
pub mod telemetry;

pub use pipeline::BridgePipeline;
pub use server::GestureServer;
