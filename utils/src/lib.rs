//! Shared utilities for the KYC wizard workspace.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat};
