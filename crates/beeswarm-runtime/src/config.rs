#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Bundles the simulation tuning with presentation settings: canvas size,
//! scale colours, and mark radius. Colours are kept as strings so they can
//! come straight from a config file; [`EngineConfig::validate`] parses them.
//!
//! # Invariants
//!
//! - `simulation.inner_height` is the height the category bands partition.
//!   [`EngineConfig::with_viewport`] keeps it equal to the viewport's inner
//!   height.
//! - Sentiment colours pair with the domain `[-1, 0, 1]`, subjectivity
//!   colours with `[0, 1]`.

use beeswarm_core::event::EncodingMode;
use beeswarm_core::geometry::Viewport;
use beeswarm_layout::{ConfigError, SimulationConfig};
use beeswarm_style::{ColorScale, ColorScales};

/// Sentiment breakpoints, negative to positive.
pub const SENTIMENT_DOMAIN: [f64; 3] = [-1.0, 0.0, 1.0];
/// Subjectivity breakpoints, objective to subjective.
pub const SUBJECTIVITY_DOMAIN: [f64; 2] = [0.0, 1.0];

/// Everything an [`Engine`](crate::Engine) needs besides the data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub simulation: SimulationConfig,
    pub viewport: Viewport,
    /// Colours at `-1`, `0`, `1`.
    pub sentiment_colors: Vec<String>,
    /// Colours at `0`, `1`.
    pub subjectivity_colors: Vec<String>,
    /// Radius of each drawn mark.
    pub mark_radius: f64,
    /// Mode active before the first switch.
    pub initial_mode: EncodingMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            simulation: SimulationConfig::default().with_inner_height(viewport.inner_height()),
            viewport,
            sentiment_colors: vec!["red".into(), "#ECECEC".into(), "green".into()],
            subjectivity_colors: vec!["#ECECEC".into(), "#4467C4".into()],
            mark_radius: 4.0,
            initial_mode: EncodingMode::Sentiment,
        }
    }
}

impl EngineConfig {
    /// Defaults with the simulation section read from `BEESWARM_*`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            simulation: SimulationConfig::from_env(),
            ..Self::default()
        }
    }

    /// Use `viewport` and lay bands out over its inner height.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.simulation.inner_height = viewport.inner_height();
        self.viewport = viewport;
        self
    }

    /// Replace the simulation section.
    #[must_use]
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Set the jitter seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Start in `mode`.
    #[must_use]
    pub fn with_initial_mode(mut self, mode: EncodingMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Parse the configured colours into scales.
    pub fn color_scales(&self) -> Result<ColorScales, Vec<ConfigError>> {
        let sentiment = scale_from(
            "sentiment_colors",
            SENTIMENT_DOMAIN.to_vec(),
            &self.sentiment_colors,
        );
        let subjectivity = scale_from(
            "subjectivity_colors",
            SUBJECTIVITY_DOMAIN.to_vec(),
            &self.subjectivity_colors,
        );
        match (sentiment, subjectivity) {
            (Ok(sentiment), Ok(subjectivity)) => Ok(ColorScales {
                sentiment,
                subjectivity,
            }),
            (sentiment, subjectivity) => Err([sentiment.err(), subjectivity.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    /// Validate every section and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = self.simulation.validate().err().unwrap_or_default();
        if let Err(mut colors) = self.color_scales() {
            errors.append(&mut colors);
        }
        if !(self.mark_radius.is_finite() && self.mark_radius > 0.0) {
            errors.push(ConfigError::new(
                "mark_radius",
                self.mark_radius.to_string(),
                "must be finite and > 0",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn scale_from(
    field: &'static str,
    domain: Vec<f64>,
    colors: &[String],
) -> Result<ColorScale, ConfigError> {
    ColorScale::from_strs(domain, colors)
        .map_err(|err| ConfigError::new(field, colors.join(","), err.to_string()))
}
