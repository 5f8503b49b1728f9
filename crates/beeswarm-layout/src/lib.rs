#![forbid(unsafe_code)]

//! Layout: category bands and the force simulation.
//!
//! - [`CategoryAxis`] - first-seen category order mapped onto vertical bands
//! - [`Simulation`] - tick-driven relaxation (collision, band alignment,
//!   horizontal scatter) with an `Idle → Running → Settled` lifecycle
//! - [`SimulationConfig`] - tunable constants, env-loadable and validated
//!
//! The simulation is driven from outside: call [`Simulation::tick`] once per
//! frame until [`Simulation::status`] reports [`SimulationStatus::Settled`].
//!
//! ```
//! use beeswarm_core::record::Record;
//! use beeswarm_layout::{CategoryAxis, Simulation, SimulationConfig, SimulationStatus};
//!
//! let records = vec![
//!     Record::new("Jan", 1.0, 0.2, "a"),
//!     Record::new("Jan", -1.0, 0.9, "b"),
//! ];
//! let config = SimulationConfig::default().with_seed(7);
//! let axis = CategoryAxis::build(&records, config.inner_height);
//! let mut sim = Simulation::new(&axis, &config);
//! while sim.status() != SimulationStatus::Settled {
//!     sim.tick();
//! }
//! assert!(sim.positions()[0].distance(sim.positions()[1]) >= sim.min_separation() - 1e-3);
//! ```

pub mod axis;
pub mod config;
pub mod force;
pub mod simulation;

pub use axis::{CategoryAxis, CategoryIndex};
pub use config::{ConfigError, SimulationConfig, SimulationConfigParse};
pub use simulation::{SettleReason, Simulation, SimulationStatus, TickReport};
