#![forbid(unsafe_code)]

//! The engine: one owner for dataset, layout, encoding, and selection.
//!
//! # Event flow
//!
//! ```text
//! Event ──► Engine::apply ──► state change ──► Snapshot
//! ```
//!
//! Every event is handled to completion before the next one, and every
//! handled event yields a full [`Snapshot`]. The engine never changes a
//! record's domain fields; only positions, selection, and derived colours
//! move.
//!
//! # Invariants
//!
//! 1. `dataset`, `scales.axis`, and `simulation` always describe the same
//!    records (same length, same order).
//! 2. Loading a dataset bumps the generation, drops the old simulation, and
//!    clears the selection, so ids from an older dataset resolve to nothing.
//! 3. Switching the encoding mode touches neither positions nor selection.
//! 4. The legend is rebuilt only when the mode changes.
//!
//! # Failure Modes
//!
//! - Toggling an id from another dataset: ignored, logged at debug.
//! - Unknown encoding name: [`EngineError::UnknownEncodingMode`], mode kept.
//! - Invalid config: [`EngineError::InvalidConfig`] from
//!   [`Engine::with_config`].

use std::fmt;

use beeswarm_core::event::{EncodingMode, Event};
use beeswarm_core::record::{Dataset, Record, RecordId};
use beeswarm_layout::{ConfigError, Simulation, SimulationStatus};
use beeswarm_style::{ColorScales, EncodingSelector, Legend};
use tracing::{debug, debug_span, info, warn};

use crate::config::EngineConfig;
use crate::scales::Scales;
use crate::selection::Selection;
use crate::snapshot::{CategoryLabel, Mark, Snapshot};

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A mode name that is neither `sentiment` nor `subjectivity`.
    UnknownEncodingMode(String),
    /// Configuration failed validation.
    InvalidConfig(Vec<ConfigError>),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEncodingMode(name) => write!(f, "unknown encoding mode {name:?}"),
            Self::InvalidConfig(errors) => {
                write!(f, "invalid engine config: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Beeswarm engine state.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    scales: Scales,
    encoding: EncodingSelector,
    dataset: Dataset,
    simulation: Simulation,
    selection: Selection,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with default configuration and no data.
    #[must_use]
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), ColorScales::default())
    }

    /// Engine with `config`, validated up front.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let colors = config.color_scales().map_err(EngineError::InvalidConfig)?;
        Ok(Self::build(config, colors))
    }

    fn build(config: EngineConfig, colors: ColorScales) -> Self {
        let scales = Scales::build(&[], config.simulation.inner_height, &colors);
        let mut simulation = Simulation::new(&scales.axis, &config.simulation);
        simulation.start();
        Self {
            encoding: EncodingSelector::new(config.initial_mode, &colors),
            scales,
            dataset: Dataset::new(0, Vec::new()),
            simulation,
            selection: Selection::new(),
            config,
        }
    }

    /// Handle one event and return the resulting state.
    pub fn apply(&mut self, event: Event) -> Result<Snapshot, EngineError> {
        debug!(event = event.kind(), "apply");
        Ok(match event {
            Event::DatasetLoaded(records) => self.load(records),
            Event::Tick => self.tick(),
            Event::SetEncodingMode(mode) => self.set_encoding_mode(mode),
            Event::ToggleSelection(id) => self.toggle_selection(id),
        })
    }

    /// Replace the dataset and start a fresh layout.
    ///
    /// An empty dataset settles immediately.
    pub fn load(&mut self, records: Vec<Record>) -> Snapshot {
        let generation = self.dataset.generation().wrapping_add(1);
        self.scales = Scales::build(
            &records,
            self.config.simulation.inner_height,
            &self.scales.colors,
        );
        self.simulation = Simulation::new(&self.scales.axis, &self.config.simulation);
        self.dataset = Dataset::new(generation, records);
        self.selection.clear();

        info!(
            records = self.dataset.len(),
            categories = self.scales.axis.len(),
            generation,
            "dataset loaded"
        );

        self.simulation.start();
        self.log_if_settled();
        self.snapshot()
    }

    /// Advance the layout one step. No-op once settled.
    pub fn tick(&mut self) -> Snapshot {
        if self.simulation.status() == SimulationStatus::Running {
            let span = debug_span!(
                "simulation.tick",
                tick = self.simulation.tick_count() + 1,
                alpha = self.simulation.alpha()
            );
            let _guard = span.enter();
            self.simulation.tick();
            self.log_if_settled();
        }
        self.snapshot()
    }

    /// Switch the colour metric. Positions and selection are untouched.
    pub fn set_encoding_mode(&mut self, mode: EncodingMode) -> Snapshot {
        if self.encoding.set_mode(mode, &self.scales.colors) {
            debug!(mode = %mode, "encoding mode changed");
        }
        self.snapshot()
    }

    /// Switch the colour metric by name (`"sentiment"`, `"subjectivity"`,
    /// or the dropdown's `"true"`/`"false"`).
    pub fn select_encoding(&mut self, name: &str) -> Result<Snapshot, EngineError> {
        match name.parse::<EncodingMode>() {
            Ok(mode) => Ok(self.set_encoding_mode(mode)),
            Err(_) => {
                warn!(
                    value = name,
                    kept = %self.encoding.mode(),
                    "rejected unknown encoding mode"
                );
                Err(EngineError::UnknownEncodingMode(name.to_string()))
            }
        }
    }

    /// Select `id` if unselected, deselect it otherwise.
    ///
    /// Ids that do not belong to the current dataset are ignored.
    pub fn toggle_selection(&mut self, id: RecordId) -> Snapshot {
        if self.dataset.contains(id) {
            self.selection.toggle(id);
        } else {
            debug!(
                id = %id,
                generation = self.dataset.generation(),
                "ignoring toggle for record outside current dataset"
            );
        }
        self.snapshot()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let colors = &self.scales.colors;
        let marks = self
            .dataset
            .iter()
            .zip(self.simulation.positions())
            .map(|((id, record), &position)| Mark {
                id,
                position,
                fill: self.encoding.color_of(record, colors),
                selected: self.selection.contains(id),
            })
            .collect();
        let selected = self
            .selection
            .iter()
            .filter_map(|id| self.dataset.get(id).map(|r| (id, r.raw_text.clone())))
            .collect();
        let category_labels = self
            .scales
            .axis
            .iter()
            .map(|(_, name, band)| CategoryLabel {
                name: name.to_string(),
                y: band.start,
            })
            .collect();

        Snapshot {
            generation: self.dataset.generation(),
            marks,
            selected,
            legend: self.encoding.legend().clone(),
            category_labels,
            status: self.simulation.status(),
            mode: self.encoding.mode(),
            tick: self.simulation.tick_count(),
            mark_radius: self.config.mark_radius,
        }
    }

    #[inline]
    pub fn status(&self) -> SimulationStatus {
        self.simulation.status()
    }

    #[inline]
    pub fn mode(&self) -> EncodingMode {
        self.encoding.mode()
    }

    /// Legend for the active mode.
    #[inline]
    pub fn legend(&self) -> &Legend {
        self.encoding.legend()
    }

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    #[inline]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn log_if_settled(&self) {
        if self.simulation.is_settled() {
            info!(
                ticks = self.simulation.tick_count(),
                reason = ?self.simulation.settle_reason(),
                residual_overlap = self.simulation.residual_overlap(),
                kinetic_energy = self.simulation.settle_energy(),
                "simulation settled"
            );
        }
    }
}
