//! # Utility Modules
//!
//! Supporting utilities for logging and observability.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` setup driven by `LoggingSettings`
//! - **Metrics**: thread-safe counters owned by each registry

pub mod logging;
pub mod metrics;
