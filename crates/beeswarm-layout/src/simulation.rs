#![forbid(unsafe_code)]

//! Tick-driven force simulation.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start()--> Running --tick()*--> Settled
//! ```
//!
//! A simulation is built for exactly one dataset and never restarts: a new
//! dataset gets a new `Simulation`, with no positions carried over.
//!
//! # Tick
//!
//! Each tick:
//! 1. `alpha += (0 - alpha) * alpha_decay`
//! 2. collision, band alignment (y) and horizontal scatter (x) each add to
//!    the velocities
//! 3. `v *= 1 - velocity_decay`, then `p += v`
//!
//! The simulation settles once `alpha < alpha_min` or `max_ticks` have run.
//! Settling runs one positional projection so no pair of final positions is
//! closer than the minimum separation (beyond `overlap_tolerance`), then
//! zeroes velocities. After that `tick()` does nothing.
//!
//! # Determinism
//!
//! Horizontal targets are drawn once per record from a ChaCha8 stream. With
//! `SimulationConfig::seed` set, the whole run is reproducible; without it,
//! the stream is seeded from OS entropy.

use std::f64::consts::PI;

use beeswarm_core::geometry::{Point, Vector};
use rand::SeedableRng;
use rand::distributions::{Distribution, Standard};
use rand_chacha::ChaCha8Rng;

use crate::axis::CategoryAxis;
use crate::config::SimulationConfig;
use crate::force::{Collide, Force, PullX, PullY, project_overlaps};

const INITIAL_RADIUS: f64 = 10.0;

/// Where the simulation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationStatus {
    /// Built but not yet started.
    Idle,
    /// Producing new positions on every tick.
    Running,
    /// Terminal: positions are final.
    Settled,
}

impl SimulationStatus {
    /// Lowercase name for logs and snapshots.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Settled => "settled",
        }
    }
}

/// Why the simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleReason {
    /// Nothing to lay out.
    Empty,
    /// Alpha fell below `alpha_min`.
    AlphaFloor,
    /// `max_ticks` reached first.
    TickLimit,
}

/// Summary of one completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u32,
    /// Alpha used for this tick.
    pub alpha: f64,
    /// Whether this tick settled the simulation.
    pub settled: bool,
}

/// Force-directed layout state for one dataset.
#[derive(Debug, Clone)]
pub struct Simulation {
    positions: Vec<Point>,
    velocities: Vec<Vector>,
    collide: Collide,
    pull_x: PullX,
    pull_y: PullY,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    velocity_decay: f64,
    max_ticks: u32,
    ticks: u32,
    status: SimulationStatus,
    settle_reason: Option<SettleReason>,
    overlap_tolerance: f64,
    settle_passes: u32,
    residual_overlap: f64,
    settle_energy: f64,
}

impl Simulation {
    /// Build an idle simulation with one node per record of `axis`.
    ///
    /// Nodes start on d3's phyllotaxis spiral with zero velocity; each node's
    /// y target is its band centre and its x target is
    /// `x_base + U(0, x_jitter)`, drawn once here.
    pub fn new(axis: &CategoryAxis, config: &SimulationConfig) -> Self {
        let n = axis.record_count();
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let positions = (0..n).map(phyllotaxis).collect();
        let x_targets = (0..n)
            .map(|_| {
                let u: f64 = Standard.sample(&mut rng);
                config.x_base + u * config.x_jitter
            })
            .collect();
        let y_targets = axis
            .assignments()
            .iter()
            .map(|&idx| axis.band(idx).center())
            .collect();

        Self {
            positions,
            velocities: vec![Vector::ZERO; n],
            collide: Collide::new(
                config.collision_radius,
                config.collision_strength,
                config.collision_iterations,
            ),
            pull_x: PullX::new(x_targets, config.x_strength),
            pull_y: PullY::new(y_targets, config.y_strength),
            alpha: 1.0,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            velocity_decay: config.velocity_decay,
            max_ticks: config.max_ticks,
            ticks: 0,
            status: SimulationStatus::Idle,
            settle_reason: None,
            overlap_tolerance: config.overlap_tolerance,
            settle_passes: config.settle_passes,
            residual_overlap: 0.0,
            settle_energy: 0.0,
        }
    }

    /// `Idle → Running`. An empty simulation goes straight to `Settled`.
    /// Has no effect in any other state.
    pub fn start(&mut self) {
        if self.status != SimulationStatus::Idle {
            return;
        }
        if self.positions.is_empty() {
            self.settle(SettleReason::Empty);
            return;
        }
        self.status = SimulationStatus::Running;
        beeswarm_core::debug!(nodes = self.positions.len(), "layout started");
    }

    /// Advance one step. Starts an idle simulation first.
    ///
    /// Returns `None` once settled (no work is done).
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.status == SimulationStatus::Idle {
            self.start();
        }
        if self.status != SimulationStatus::Running {
            return None;
        }

        self.alpha += (0.0 - self.alpha) * self.alpha_decay;
        let alpha = self.alpha;

        self.collide
            .apply(&self.positions, &mut self.velocities, alpha);
        self.pull_y.apply(&self.positions, &mut self.velocities, alpha);
        self.pull_x.apply(&self.positions, &mut self.velocities, alpha);

        let keep = 1.0 - self.velocity_decay;
        for (p, v) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *v = *v * keep;
            *p += *v;
        }
        self.ticks += 1;
        beeswarm_core::trace!(tick = self.ticks, alpha, "simulation tick");

        if self.alpha < self.alpha_min {
            self.settle(SettleReason::AlphaFloor);
        } else if self.ticks >= self.max_ticks {
            self.settle(SettleReason::TickLimit);
        }

        Some(TickReport {
            tick: self.ticks,
            alpha,
            settled: self.status == SimulationStatus::Settled,
        })
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    /// Why the simulation settled, once it has.
    #[inline]
    pub fn settle_reason(&self) -> Option<SettleReason> {
        self.settle_reason
    }

    /// Whether the simulation has reached its terminal state.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.status == SimulationStatus::Settled
    }

    /// Position of every record, in dataset order.
    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Position of the record at arena slot `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    /// Current alpha (activity level).
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Ticks run so far.
    #[inline]
    pub fn tick_count(&self) -> u32 {
        self.ticks
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Minimum centre distance the collision force maintains.
    #[inline]
    pub fn min_separation(&self) -> f64 {
        self.collide.separation()
    }

    /// Largest overlap left after the settle projection (0 when clean).
    #[inline]
    pub fn residual_overlap(&self) -> f64 {
        self.residual_overlap
    }

    /// [`kinetic_energy`](Self::kinetic_energy) at the moment of settling,
    /// before velocities were zeroed.
    #[inline]
    pub fn settle_energy(&self) -> f64 {
        self.settle_energy
    }

    /// Horizontal target of each node.
    pub fn x_targets(&self) -> &[f64] {
        self.pull_x.targets()
    }

    /// Vertical target (band centre) of each node.
    pub fn y_targets(&self) -> &[f64] {
        self.pull_y.targets()
    }

    /// Mean squared speed; 0 for an empty or settled simulation.
    pub fn kinetic_energy(&self) -> f64 {
        if self.velocities.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.velocities.iter().map(|v| v.length_sq()).sum();
        sum / self.velocities.len() as f64
    }

    fn settle(&mut self, reason: SettleReason) {
        self.settle_energy = self.kinetic_energy();
        self.residual_overlap = project_overlaps(
            &mut self.positions,
            self.collide.separation(),
            self.overlap_tolerance,
            self.settle_passes,
        );
        self.velocities.iter_mut().for_each(|v| *v = Vector::ZERO);
        self.status = SimulationStatus::Settled;
        self.settle_reason = Some(reason);
        beeswarm_core::debug!(
            ticks = self.ticks,
            reason = ?reason,
            residual_overlap = self.residual_overlap,
            kinetic_energy = self.settle_energy,
            "layout settled"
        );
        if self.residual_overlap > self.overlap_tolerance {
            beeswarm_core::warn!(
                nodes = self.positions.len(),
                residual_overlap = self.residual_overlap,
                "layout settled with overlapping marks"
            );
        }
    }
}

/// d3's initial placement: node `i` on a sunflower spiral around the origin.
fn phyllotaxis(i: usize) -> Point {
    let angle = PI * (3.0 - 5.0_f64.sqrt());
    let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
    let theta = i as f64 * angle;
    Point::new(radius * theta.cos(), radius * theta.sin())
}
