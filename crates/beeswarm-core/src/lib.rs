#![forbid(unsafe_code)]

//! Core: records, identity keys, geometry, and engine events.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod record;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, warn};
