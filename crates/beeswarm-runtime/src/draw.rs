#![forbid(unsafe_code)]

//! Draw-command diff between snapshots.
//!
//! The presentation layer keeps one drawn element per record. Instead of
//! redrawing every mark on every tick, it applies the commands produced by
//! [`diff`], which mention only what changed.
//!
//! # Algorithm
//!
//! 1. Index the previous marks by [`RecordId`].
//! 2. Emit `Remove` for every previous id missing from `next`, in previous
//!    order.
//! 3. Walk `next` in dataset order: unknown ids get `Create`, known ids get
//!    `Move` if the position changed and `Restyle` if fill or stroke did.
//!
//! Ids are generation-scoped, so a new dataset always becomes a block of
//! removes followed by a block of creates.
//!
//! ```
//! use beeswarm_core::record::Record;
//! use beeswarm_runtime::Engine;
//! use beeswarm_runtime::draw::{DrawCommand, diff};
//!
//! let mut engine = Engine::new();
//! let first = engine.load(vec![Record::new("Jan", 0.0, 0.5, "hi")]);
//! let commands = diff(None, &first);
//! assert!(matches!(commands[0], DrawCommand::Create { .. }));
//! ```

use std::collections::HashMap;

use beeswarm_core::geometry::Point;
use beeswarm_core::record::RecordId;
use beeswarm_style::Rgb;

use crate::snapshot::{Mark, Snapshot};

/// Stroke drawn around selected marks.
pub const SELECTED_STROKE: Rgb = Rgb::BLACK;

/// Visual attributes of one mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub fill: Rgb,
    /// `Some` only for selected marks.
    pub stroke: Option<Rgb>,
    pub radius: f64,
}

impl MarkStyle {
    /// Style of `mark` at `radius`.
    #[must_use]
    pub fn of(mark: &Mark, radius: f64) -> Self {
        Self {
            fill: mark.fill,
            stroke: mark.selected.then_some(SELECTED_STROKE),
            radius,
        }
    }
}

/// One instruction for the presentation layer. Positions are in layout
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Create {
        id: RecordId,
        at: Point,
        style: MarkStyle,
    },
    Move {
        id: RecordId,
        to: Point,
    },
    Restyle {
        id: RecordId,
        style: MarkStyle,
    },
    Remove {
        id: RecordId,
    },
}

impl DrawCommand {
    /// Record the command applies to.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        match *self {
            Self::Create { id, .. }
            | Self::Move { id, .. }
            | Self::Restyle { id, .. }
            | Self::Remove { id } => id,
        }
    }
}

/// Commands that turn the drawing of `prev` into the drawing of `next`.
///
/// `prev = None` means nothing is drawn yet.
#[must_use]
pub fn diff(prev: Option<&Snapshot>, next: &Snapshot) -> Vec<DrawCommand> {
    let Some(prev) = prev else {
        return next
            .marks
            .iter()
            .map(|mark| create(mark, next.mark_radius))
            .collect();
    };

    let before: HashMap<RecordId, &Mark> = prev.marks.iter().map(|m| (m.id, m)).collect();
    let mut commands: Vec<DrawCommand> = prev
        .marks
        .iter()
        .filter(|old| next.mark(old.id).is_none())
        .map(|old| DrawCommand::Remove { id: old.id })
        .collect();

    for mark in &next.marks {
        let Some(old) = before.get(&mark.id) else {
            commands.push(create(mark, next.mark_radius));
            continue;
        };
        if old.position != mark.position {
            commands.push(DrawCommand::Move {
                id: mark.id,
                to: mark.position,
            });
        }
        let style = MarkStyle::of(mark, next.mark_radius);
        if MarkStyle::of(old, prev.mark_radius) != style {
            commands.push(DrawCommand::Restyle { id: mark.id, style });
        }
    }
    commands
}

fn create(mark: &Mark, radius: f64) -> DrawCommand {
    DrawCommand::Create {
        id: mark.id,
        at: mark.position,
        style: MarkStyle::of(mark, radius),
    }
}
