//! Structured logging for the preview server.
//!
//! Console logging for interactive use, rolling NDJSON files for
//! request auditing.

pub mod logger;

pub use logger::init_logger;
