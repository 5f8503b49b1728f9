#![forbid(unsafe_code)]

//! Beeswarm public facade crate.
//!
//! Re-exports the common types from the internal crates, a single
//! [`Error`]/[`Result`] pair, and a prelude for day-to-day use.
//!
//! ```
//! use beeswarm::prelude::*;
//!
//! let mut engine = Engine::with_config(EngineConfig::default().with_seed(1))?;
//! engine.load(vec![
//!     Record::new("Jan", 1.0, 0.2, "a"),
//!     Record::new("Jan", -1.0, 0.9, "b"),
//! ]);
//! let ticks = run_until_settled(&mut engine, |_| {});
//! assert!(ticks > 0);
//! engine.select_encoding("subjectivity")?;
//! # Ok::<(), beeswarm::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use beeswarm_core::event::{EncodingMode, Event, ParseEncodingModeError};
pub use beeswarm_core::geometry::{Band, Margin, Point, Vector, Viewport};
pub use beeswarm_core::record::{Dataset, Record, RecordId};

// --- Layout re-exports -----------------------------------------------------

pub use beeswarm_layout::{
    CategoryAxis, CategoryIndex, ConfigError, SettleReason, Simulation, SimulationConfig,
    SimulationStatus,
};

// --- Style re-exports ------------------------------------------------------

pub use beeswarm_style::{
    ColorParseError, ColorScale, ColorScales, Legend, LegendEntry, Rgb, ScaleError,
};

// --- Runtime re-exports ----------------------------------------------------

pub use beeswarm_runtime::driver::run_until_settled;
pub use beeswarm_runtime::{
    CategoryLabel, DrawCommand, Engine, EngineConfig, EngineError, Mark, MarkStyle, Scales,
    Selection, Snapshot,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for beeswarm callers.
#[derive(Debug)]
pub enum Error {
    /// Engine rejected an operation.
    Engine(EngineError),
    /// A colour scale could not be built.
    Scale(ScaleError),
    /// A dataset failed to parse.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "{err}"),
            Self::Scale(err) => write!(f, "{err}"),
            #[cfg(feature = "serde")]
            Self::Json(err) => write!(f, "dataset: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Scale(err) => Some(err),
            #[cfg(feature = "serde")]
            Self::Json(err) => Some(err),
        }
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<ScaleError> for Error {
    fn from(err: ScaleError) -> Self {
        Self::Scale(err)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for beeswarm APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a JSON array of records.
///
/// Accepts both `category`/`sentiment`/`subjectivity`/`raw_text` and the
/// legacy `Month`/`Sentiment`/`Subjectivity`/`RawTweet` field names.
#[cfg(feature = "serde")]
pub fn records_from_json(json: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(json)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        EncodingMode, Engine, EngineConfig, Error, Event, Point, Record, RecordId, Result, Rgb,
        SimulationConfig, SimulationStatus, Snapshot, run_until_settled,
    };

    pub use crate::{core, layout, runtime, style};
}

pub use beeswarm_core as core;
pub use beeswarm_layout as layout;
pub use beeswarm_runtime as runtime;
pub use beeswarm_style as style;
