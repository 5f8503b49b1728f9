#![forbid(unsafe_code)]

//! Runtime: the event-driven engine around layout and style.
//!
//! # Role
//! `beeswarm-runtime` owns all mutable state. Events go in through
//! [`Engine::apply`], snapshots come out, and [`draw::diff`] turns successive
//! snapshots into draw commands. [`driver::run_until_settled`] is the
//! simplest scheduler.
//!
//! # How it fits
//! - `beeswarm-core`: records, ids, events, geometry
//! - `beeswarm-layout`: category axis and simulation
//! - `beeswarm-style`: colour scales, encoding, legends
//!
//! Logging uses `tracing` directly; install any subscriber to see it.

pub mod config;
pub mod draw;
pub mod driver;
pub mod engine;
pub mod scales;
pub mod selection;
pub mod snapshot;

pub use config::EngineConfig;
pub use draw::{DrawCommand, MarkStyle};
pub use engine::{Engine, EngineError};
pub use scales::Scales;
pub use selection::Selection;
pub use snapshot::{CategoryLabel, Mark, Snapshot};
