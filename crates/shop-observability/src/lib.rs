//! Structured diagnostics for the storefront product pages.
//!
//! This crate provides:
//! - `ViewId` - Identifier correlating the diagnostics of one view
//! - `StructuredLogger` - Structured logging with view context
//! - `LogSink` - Where rendered entries go (`tracing` by default)

mod id;
mod logging;
mod sink;

pub use id::*;
pub use logging::*;
pub use sink::*;
