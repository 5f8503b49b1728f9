#![forbid(unsafe_code)]

//! Simulation tuning.
//!
//! Defaults reproduce the classic d3 beeswarm: collide radius 5.5, x/y pull
//! strength 0.1, velocity decay 0.4, and an alpha that starts at 1 and decays
//! by `1 - 0.001^(1/300)` per tick until it drops below 0.1 (about 100
//! ticks). All of these are empirical and can be overridden.
//!
//! Environment variables (all optional):
//!
//! | variable                        | field                  |
//! |---------------------------------|------------------------|
//! | `BEESWARM_SEED`                 | `seed`                 |
//! | `BEESWARM_ALPHA_MIN`            | `alpha_min`            |
//! | `BEESWARM_ALPHA_DECAY`          | `alpha_decay`          |
//! | `BEESWARM_VELOCITY_DECAY`       | `velocity_decay`       |
//! | `BEESWARM_MAX_TICKS`            | `max_ticks`            |
//! | `BEESWARM_COLLISION_RADIUS`     | `collision_radius`     |
//! | `BEESWARM_COLLISION_ITERATIONS` | `collision_iterations` |
//! | `BEESWARM_X_BASE`               | `x_base`               |
//! | `BEESWARM_X_JITTER`             | `x_jitter`             |
//! | `BEESWARM_INNER_HEIGHT`         | `inner_height`         |

use std::env;
use std::fmt;

const ENV_SEED: &str = "BEESWARM_SEED";
const ENV_ALPHA_MIN: &str = "BEESWARM_ALPHA_MIN";
const ENV_ALPHA_DECAY: &str = "BEESWARM_ALPHA_DECAY";
const ENV_VELOCITY_DECAY: &str = "BEESWARM_VELOCITY_DECAY";
const ENV_MAX_TICKS: &str = "BEESWARM_MAX_TICKS";
const ENV_COLLISION_RADIUS: &str = "BEESWARM_COLLISION_RADIUS";
const ENV_COLLISION_ITERATIONS: &str = "BEESWARM_COLLISION_ITERATIONS";
const ENV_X_BASE: &str = "BEESWARM_X_BASE";
const ENV_X_JITTER: &str = "BEESWARM_X_JITTER";
const ENV_INNER_HEIGHT: &str = "BEESWARM_INNER_HEIGHT";

/// d3's default per-tick alpha decay: `1 - 0.001^(1/300)`.
pub fn default_alpha_decay() -> f64 {
    1.0 - 0.001_f64.powf(1.0 / 300.0)
}

/// Tunable constants for [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Jitter seed. `None` seeds from OS entropy (layouts differ per run).
    pub seed: Option<u64>,
    /// Settle once alpha falls below this (alpha starts at 1.0).
    pub alpha_min: f64,
    /// Fraction of remaining alpha removed each tick.
    pub alpha_decay: f64,
    /// Fraction of velocity lost each tick (friction).
    pub velocity_decay: f64,
    /// Hard cap on ticks before settling regardless of alpha.
    pub max_ticks: u32,
    /// Per-record collision radius; centres stay `2 * radius` apart.
    pub collision_radius: f64,
    /// Fraction of an overlap resolved per collision pass.
    pub collision_strength: f64,
    /// Collision passes per tick.
    pub collision_iterations: u32,
    /// Left edge of the horizontal target range.
    pub x_base: f64,
    /// Width of the horizontal target range (`x_base + U(0, x_jitter)`).
    pub x_jitter: f64,
    /// Pull towards the horizontal target.
    pub x_strength: f64,
    /// Pull towards the band centre.
    pub y_strength: f64,
    /// Height partitioned into category bands.
    pub inner_height: f64,
    /// Overlap allowed after the final settle pass.
    pub overlap_tolerance: f64,
    /// Projection pass budget when settling. Layouts with more nodes than
    /// this get one pass per node.
    pub settle_passes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            alpha_min: 0.1,
            alpha_decay: default_alpha_decay(),
            velocity_decay: 0.4,
            max_ticks: 300,
            collision_radius: 5.5,
            collision_strength: 1.0,
            collision_iterations: 1,
            x_base: 200.0,
            x_jitter: 125.0,
            x_strength: 0.1,
            y_strength: 0.1,
            inner_height: 410.0,
            overlap_tolerance: 1e-3,
            settle_passes: 256,
        }
    }
}

/// Config parse result with diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct SimulationConfigParse {
    pub config: SimulationConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SimulationConfig {
    /// Defaults overridden by `BEESWARM_*` environment variables.
    ///
    /// Invalid values are dropped (the default is kept); use
    /// [`from_env_with_diagnostics`](Self::from_env_with_diagnostics) to see
    /// them.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> SimulationConfigParse {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse config through an arbitrary key lookup.
    pub fn from_lookup<F>(mut get: F) -> SimulationConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_SEED) {
            match value.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => errors.push(ConfigError::new("seed", value, "expected u64")),
            }
        }

        read_f64(&mut get, ENV_ALPHA_MIN, "alpha_min", &mut config.alpha_min, &mut errors);
        read_f64(&mut get, ENV_ALPHA_DECAY, "alpha_decay", &mut config.alpha_decay, &mut errors);
        read_f64(
            &mut get,
            ENV_VELOCITY_DECAY,
            "velocity_decay",
            &mut config.velocity_decay,
            &mut errors,
        );
        read_u32(&mut get, ENV_MAX_TICKS, "max_ticks", &mut config.max_ticks, &mut errors);
        read_f64(
            &mut get,
            ENV_COLLISION_RADIUS,
            "collision_radius",
            &mut config.collision_radius,
            &mut errors,
        );
        read_u32(
            &mut get,
            ENV_COLLISION_ITERATIONS,
            "collision_iterations",
            &mut config.collision_iterations,
            &mut errors,
        );
        read_f64(&mut get, ENV_X_BASE, "x_base", &mut config.x_base, &mut errors);
        read_f64(&mut get, ENV_X_JITTER, "x_jitter", &mut config.x_jitter, &mut errors);
        read_f64(
            &mut get,
            ENV_INNER_HEIGHT,
            "inner_height",
            &mut config.inner_height,
            &mut errors,
        );

        if let Err(mut validation) = config.validate() {
            // Out-of-range fields fall back to their defaults.
            config.repair(&validation);
            errors.append(&mut validation);
        }

        SimulationConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_unit_open("alpha_min", self.alpha_min, &mut errors);
        validate_unit_open("alpha_decay", self.alpha_decay, &mut errors);
        validate_unit_closed("velocity_decay", self.velocity_decay, &mut errors);
        validate_unit_closed("collision_strength", self.collision_strength, &mut errors);
        validate_unit_closed("x_strength", self.x_strength, &mut errors);
        validate_unit_closed("y_strength", self.y_strength, &mut errors);
        validate_non_negative("collision_radius", self.collision_radius, &mut errors);
        validate_non_negative("x_jitter", self.x_jitter, &mut errors);
        validate_non_negative("inner_height", self.inner_height, &mut errors);
        validate_non_negative("overlap_tolerance", self.overlap_tolerance, &mut errors);
        if !self.x_base.is_finite() {
            errors.push(ConfigError::new(
                "x_base",
                self.x_base.to_string(),
                "must be finite",
            ));
        }
        if self.max_ticks == 0 {
            errors.push(ConfigError::new("max_ticks", "0", "must be >= 1"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builder: fix the jitter seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set the settle threshold.
    #[must_use]
    pub fn with_alpha_min(mut self, alpha_min: f64) -> Self {
        self.alpha_min = alpha_min;
        self
    }

    /// Builder: set the tick cap.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Builder: set the collision radius.
    #[must_use]
    pub fn with_collision_radius(mut self, radius: f64) -> Self {
        self.collision_radius = radius;
        self
    }

    /// Builder: set the band height.
    #[must_use]
    pub fn with_inner_height(mut self, inner_height: f64) -> Self {
        self.inner_height = inner_height;
        self
    }

    /// Minimum centre-to-centre distance between two records.
    #[inline]
    pub fn min_separation(&self) -> f64 {
        2.0 * self.collision_radius
    }

    fn repair(&mut self, errors: &[ConfigError]) {
        let defaults = Self::default();
        for err in errors {
            match err.field {
                "alpha_min" => self.alpha_min = defaults.alpha_min,
                "alpha_decay" => self.alpha_decay = defaults.alpha_decay,
                "velocity_decay" => self.velocity_decay = defaults.velocity_decay,
                "collision_strength" => self.collision_strength = defaults.collision_strength,
                "x_strength" => self.x_strength = defaults.x_strength,
                "y_strength" => self.y_strength = defaults.y_strength,
                "collision_radius" => self.collision_radius = defaults.collision_radius,
                "x_jitter" => self.x_jitter = defaults.x_jitter,
                "inner_height" => self.inner_height = defaults.inner_height,
                "overlap_tolerance" => self.overlap_tolerance = defaults.overlap_tolerance,
                "x_base" => self.x_base = defaults.x_base,
                "max_ticks" => self.max_ticks = defaults.max_ticks,
                _ => {}
            }
        }
    }
}

fn read_f64<F>(
    get: &mut F,
    key: &str,
    field: &'static str,
    slot: &mut f64,
    errors: &mut Vec<ConfigError>,
) where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(value) = get(key) {
        match value.trim().parse::<f64>() {
            Ok(parsed) => *slot = parsed,
            Err(_) => errors.push(ConfigError::new(field, value, "expected number")),
        }
    }
}

fn read_u32<F>(
    get: &mut F,
    key: &str,
    field: &'static str,
    slot: &mut u32,
    errors: &mut Vec<ConfigError>,
) where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(value) = get(key) {
        match value.trim().parse::<u32>() {
            Ok(parsed) => *slot = parsed,
            Err(_) => errors.push(ConfigError::new(field, value, "expected non-negative integer")),
        }
    }
}

fn validate_unit_open(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(value > 0.0 && value < 1.0) {
        errors.push(ConfigError::new(field, value.to_string(), "must be in (0, 1)"));
    }
}

fn validate_unit_closed(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::new(field, value.to_string(), "must be in [0, 1]"));
    }
}

fn validate_non_negative(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(field, value.to_string(), "must be finite and >= 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_alpha_decay_matches_d3() {
        let decay = default_alpha_decay();
        assert!((decay - 0.022_763).abs() < 1e-5, "decay={decay}");
    }

    #[test]
    fn min_separation_is_twice_radius() {
        assert_eq!(SimulationConfig::default().min_separation(), 11.0);
    }

    #[test]
    fn empty_env_yields_defaults() {
        let parsed = SimulationConfig::from_lookup(lookup(&[]));
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config, SimulationConfig::default());
    }

    #[test]
    fn env_overrides_apply() {
        let parsed = SimulationConfig::from_lookup(lookup(&[
            ("BEESWARM_SEED", "42"),
            ("BEESWARM_MAX_TICKS", "50"),
            ("BEESWARM_COLLISION_RADIUS", "3.0"),
            ("BEESWARM_X_BASE", "10"),
        ]));
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.config.seed, Some(42));
        assert_eq!(parsed.config.max_ticks, 50);
        assert_eq!(parsed.config.collision_radius, 3.0);
        assert_eq!(parsed.config.x_base, 10.0);
    }

    #[test]
    fn unparsable_values_are_reported_and_ignored() {
        let parsed = SimulationConfig::from_lookup(lookup(&[
            ("BEESWARM_SEED", "abc"),
            ("BEESWARM_ALPHA_MIN", "low"),
        ]));
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["seed", "alpha_min"]);
        assert_eq!(parsed.config.seed, None);
        assert_eq!(parsed.config.alpha_min, 0.1);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let parsed = SimulationConfig::from_lookup(lookup(&[
            ("BEESWARM_ALPHA_MIN", "1.5"),
            ("BEESWARM_MAX_TICKS", "0"),
            ("BEESWARM_X_JITTER", "40"),
        ]));
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"alpha_min"));
        assert!(fields.contains(&"max_ticks"));
        assert_eq!(parsed.config.alpha_min, 0.1);
        assert_eq!(parsed.config.max_ticks, 300);
        assert_eq!(parsed.config.x_jitter, 40.0);
        assert_eq!(parsed.config.validate(), Ok(()));
    }

    #[test]
    fn validate_collects_every_violation() {
        let config = SimulationConfig {
            velocity_decay: 2.0,
            collision_radius: -1.0,
            x_base: f64::NAN,
            ..SimulationConfig::default()
        };
        let errors = config.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["velocity_decay", "collision_radius", "x_base"]);
    }

    #[test]
    fn error_display_has_field_and_value() {
        let err = ConfigError::new("max_ticks", "0", "must be >= 1");
        assert_eq!(err.to_string(), "max_ticks=0 (must be >= 1)");
    }

    #[test]
    fn builders_chain() {
        let config = SimulationConfig::default()
            .with_seed(3)
            .with_alpha_min(0.05)
            .with_max_ticks(10)
            .with_collision_radius(2.0)
            .with_inner_height(100.0);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.alpha_min, 0.05);
        assert_eq!(config.max_ticks, 10);
        assert_eq!(config.min_separation(), 4.0);
        assert_eq!(config.inner_height, 100.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"seed": 9, "max_ticks": 120}"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_ticks, 120);
        assert_eq!(config.collision_radius, 5.5);
    }
}
