#![forbid(unsafe_code)]

//! Forces applied by the simulation each tick.
//!
//! A [`Force`] reads positions and adds to velocities; it never moves a
//! node itself. The simulation integrates velocities afterwards. Forces are
//! additive and independent of each other.
//!
//! - [`Collide`] - pairwise separation on predicted positions (`p + v`)
//! - [`PullX`] / [`PullY`] - spring towards a per-node target coordinate
//!
//! [`project_overlaps`] is the positional counterpart of [`Collide`] used
//! once when the simulation settles.

use std::collections::HashMap;

use beeswarm_core::geometry::{Point, Vector};

/// Something that nudges velocities each tick.
pub trait Force {
    /// Add this force's contribution, scaled by `alpha`, to `velocities`.
    fn apply(&mut self, positions: &[Point], velocities: &mut [Vector], alpha: f64);
}

// ---------------------------------------------------------------------------
// Axis pulls
// ---------------------------------------------------------------------------

/// Pulls each node's x towards its own fixed target.
#[derive(Debug, Clone)]
pub struct PullX {
    targets: Vec<f64>,
    strength: f64,
}

impl PullX {
    pub fn new(targets: Vec<f64>, strength: f64) -> Self {
        Self { targets, strength }
    }

    /// Per-node targets.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}

impl Force for PullX {
    fn apply(&mut self, positions: &[Point], velocities: &mut [Vector], alpha: f64) {
        let k = self.strength * alpha;
        for ((p, v), &tx) in positions.iter().zip(velocities.iter_mut()).zip(&self.targets) {
            v.x += (tx - p.x) * k;
        }
    }
}

/// Pulls each node's y towards its own fixed target (its band centre).
#[derive(Debug, Clone)]
pub struct PullY {
    targets: Vec<f64>,
    strength: f64,
}

impl PullY {
    pub fn new(targets: Vec<f64>, strength: f64) -> Self {
        Self { targets, strength }
    }

    /// Per-node targets.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}

impl Force for PullY {
    fn apply(&mut self, positions: &[Point], velocities: &mut [Vector], alpha: f64) {
        let k = self.strength * alpha;
        for ((p, v), &ty) in positions.iter().zip(velocities.iter_mut()).zip(&self.targets) {
            v.y += (ty - p.y) * k;
        }
    }
}

// ---------------------------------------------------------------------------
// Collision
// ---------------------------------------------------------------------------

/// Keeps node centres at least `2 * radius` apart.
///
/// Works on predicted positions (`p + v`) like d3's `forceCollide`: for each
/// overlapping pair the overlap, scaled by `strength`, is split evenly and
/// added to both velocities. Not scaled by alpha, so overlaps keep being
/// corrected as the simulation cools.
#[derive(Debug, Clone)]
pub struct Collide {
    radius: f64,
    strength: f64,
    iterations: u32,
    grid: SpatialGrid,
}

impl Collide {
    pub fn new(radius: f64, strength: f64, iterations: u32) -> Self {
        Self {
            radius,
            strength,
            iterations,
            grid: SpatialGrid::new(2.0 * radius),
        }
    }

    /// Minimum centre distance enforced.
    pub fn separation(&self) -> f64 {
        2.0 * self.radius
    }
}

impl Force for Collide {
    fn apply(&mut self, positions: &[Point], velocities: &mut [Vector], _alpha: f64) {
        let sep = self.separation();
        if sep <= 0.0 || positions.len() < 2 {
            return;
        }
        let sep_sq = sep * sep;
        let mut predicted: Vec<Point> = positions
            .iter()
            .zip(velocities.iter())
            .map(|(&p, &v)| p + v)
            .collect();

        for _ in 0..self.iterations {
            self.grid.rebuild(&predicted);
            for i in 0..predicted.len() {
                let pi = predicted[i];
                for j in self.grid.neighbours(pi) {
                    if j <= i {
                        continue;
                    }
                    let pj = positions[j] + velocities[j];
                    let mut d = Vector::new(pi.x - pj.x, pi.y - pj.y);
                    let mut l = d.length_sq();
                    if l >= sep_sq {
                        continue;
                    }
                    if d.x == 0.0 {
                        d.x = jiggle(i, j);
                        l += d.x * d.x;
                    }
                    if d.y == 0.0 {
                        d.y = jiggle(j, i);
                        l += d.y * d.y;
                    }
                    let len = l.sqrt();
                    let push = (sep - len) / len * self.strength;
                    let shift = d * (push * 0.5);
                    velocities[i] += shift;
                    velocities[j] += shift * -1.0;
                }
            }
            for (slot, (&p, &v)) in predicted.iter_mut().zip(positions.iter().zip(velocities.iter()))
            {
                *slot = p + v;
            }
        }
    }
}

/// Clearance added to the separation when an overlapping pair is pushed
/// apart, as a fraction of the separation.
const PROJECTION_SLACK: f64 = 0.05;

/// Over-relaxation factor for each pair correction.
const PROJECTION_RELAXATION: f64 = 1.5;

/// Push overlapping nodes apart in place until no pair is closer than
/// `separation - tolerance`.
///
/// Only pairs overlapping by more than `tolerance` move, so a pass that
/// reports a clean layout has left it untouched. Each one is pushed towards
/// `separation * (1 + PROJECTION_SLACK)`, over-relaxed, so dense clumps
/// expand in a few hundred passes rather than thousands. The pass budget is
/// `max_passes` or the node count, whichever is larger.
///
/// Returns the largest overlap measured on the final pass (0 when clean).
pub fn project_overlaps(
    positions: &mut [Point],
    separation: f64,
    tolerance: f64,
    max_passes: u32,
) -> f64 {
    if separation <= 0.0 || positions.len() < 2 {
        return 0.0;
    }
    let budget = pass_budget(max_passes, positions.len());
    let mut grid = SpatialGrid::new(separation);
    grid.rebuild(positions);
    let mut passes = 0;
    loop {
        let worst = projection_pass(positions, &mut grid, separation, tolerance);
        passes += 1;
        if worst <= tolerance || passes >= budget {
            return worst;
        }
    }
}

/// Passes allowed for `nodes` points: at least one, and never fewer than
/// the node count.
fn pass_budget(max_passes: u32, nodes: usize) -> u64 {
    u64::from(max_passes.max(1)).max(nodes as u64)
}

fn projection_pass(
    positions: &mut [Point],
    grid: &mut SpatialGrid,
    separation: f64,
    tolerance: f64,
) -> f64 {
    let sep_sq = separation * separation;
    let target = separation * (1.0 + PROJECTION_SLACK);
    let mut worst = 0.0_f64;
    for i in 0..positions.len() {
        for j in grid.neighbours(positions[i]) {
            if j <= i {
                continue;
            }
            let mut d = positions[i] - positions[j];
            let mut l = d.length_sq();
            if l >= sep_sq {
                continue;
            }
            if l == 0.0 {
                d = Vector::new(jiggle(i, j), jiggle(j, i));
                l = d.length_sq();
            }
            let len = l.sqrt();
            let overlap = separation - len;
            worst = worst.max(overlap);
            if overlap <= tolerance {
                continue;
            }
            let shift = d * ((target - len) / len * 0.5 * PROJECTION_RELAXATION);
            move_node(positions, grid, i, shift);
            move_node(positions, grid, j, shift * -1.0);
        }
    }
    worst
}

fn move_node(positions: &mut [Point], grid: &mut SpatialGrid, index: usize, shift: Vector) {
    let from = positions[index];
    positions[index] += shift;
    grid.relocate(index, from, positions[index]);
}

/// Deterministic sub-micro nudge for exactly coincident coordinates.
fn jiggle(a: usize, b: usize) -> f64 {
    // Sign from index parity; magnitude well below any visible distance.
    let sign = if (a.wrapping_mul(31) ^ b) & 1 == 0 { 1.0 } else { -1.0 };
    sign * 1e-6
}

/// Uniform bucket grid for neighbour queries within one cell size.
#[derive(Debug, Clone)]
struct SpatialGrid {
    cell: f64,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    fn new(cell: f64) -> Self {
        Self {
            cell: if cell > 0.0 { cell } else { 1.0 },
            buckets: HashMap::new(),
        }
    }

    fn key(&self, p: Point) -> (i64, i64) {
        ((p.x / self.cell).floor() as i64, (p.y / self.cell).floor() as i64)
    }

    fn rebuild(&mut self, points: &[Point]) {
        self.buckets.clear();
        for (i, &p) in points.iter().enumerate() {
            let key = self.key(p);
            self.buckets.entry(key).or_default().push(i);
        }
    }

    /// Move `index` to the bucket of `to` if it left the bucket of `from`.
    fn relocate(&mut self, index: usize, from: Point, to: Point) {
        let (old, new) = (self.key(from), self.key(to));
        if old == new {
            return;
        }
        if let Some(bucket) = self.buckets.get_mut(&old) {
            if let Some(slot) = bucket.iter().position(|&i| i == index) {
                bucket.swap_remove(slot);
            }
            if bucket.is_empty() {
                self.buckets.remove(&old);
            }
        }
        self.buckets.entry(new).or_default().push(index);
    }

    /// Indices in the 3x3 block of cells around `p`.
    fn neighbours(&self, p: Point) -> Vec<usize> {
        let (cx, cy) = self.key(p);
        let mut out = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.buckets.get(&(cx + dx, cy + dy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out
    }
}
