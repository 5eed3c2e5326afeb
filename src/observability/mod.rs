//! Observability infrastructure for the Slack client.
//!
//! Spans and events are emitted through `tracing`; this module holds the
//! redaction helpers that keep credentials out of them.

pub mod logging;

pub use logging::*;
