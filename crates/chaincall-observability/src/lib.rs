//! # chaincall-observability
//!
//! OpenTelemetry-based observability for ChainCall.
//!
//! ## Built-in metrics
//! - `chaincall.calls_encoded`    : counter
//! - `chaincall.invalid_calls`    : counter, tagged with reason
//! - `chaincall.results_decoded`  : counter
//! - `chaincall.decode_cache_hits`: counter
//!
//! ## Structured logging
//! Text or JSON logs through `tracing-subscriber`, with log levels
//! configurable per component.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::CallMetrics;
pub use tracing_setup::{build_directives, init_tracing, LogConfig};
