#![forbid(unsafe_code)]

//! Immutable projection of engine state handed to the presentation layer.
//!
//! A snapshot is a copy: holding one never blocks the engine, and later
//! events never change it.

use beeswarm_core::event::EncodingMode;
use beeswarm_core::geometry::Point;
use beeswarm_core::record::RecordId;
use beeswarm_layout::SimulationStatus;
use beeswarm_style::{Legend, Rgb};

/// One drawn record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub id: RecordId,
    /// Layout-space position (see [`Viewport::to_canvas`](beeswarm_core::geometry::Viewport::to_canvas)).
    pub position: Point,
    pub fill: Rgb,
    pub selected: bool,
}

/// Text label for one category band.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLabel {
    pub name: String,
    /// Layout-space y of the band start.
    pub y: f64,
}

/// Full current state, as of the last processed event.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Dataset generation the marks belong to.
    pub generation: u32,
    /// One per record, in dataset order.
    pub marks: Vec<Mark>,
    /// `(id, raw_text)` of selected records, in selection order.
    pub selected: Vec<(RecordId, String)>,
    pub legend: Legend,
    pub category_labels: Vec<CategoryLabel>,
    pub status: SimulationStatus,
    pub mode: EncodingMode,
    /// Simulation ticks run for this dataset.
    pub tick: u32,
    pub mark_radius: f64,
}

impl Snapshot {
    /// Mark for `id`, if it belongs to this snapshot's dataset.
    pub fn mark(&self, id: RecordId) -> Option<&Mark> {
        self.marks.get(id.index()).filter(|mark| mark.id == id)
    }

    /// Position of `id`.
    pub fn position_of(&self, id: RecordId) -> Option<Point> {
        self.mark(id).map(|mark| mark.position)
    }

    /// Fill colour of `id`.
    pub fn color_of(&self, id: RecordId) -> Option<Rgb> {
        self.mark(id).map(|mark| mark.fill)
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.mark(id).is_some_and(|mark| mark.selected)
    }

    /// All positions in dataset order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.marks.iter().map(|mark| mark.position)
    }

    /// Raw text of selected records, in selection order.
    pub fn selected_texts(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.selected.iter().map(|(_, text)| text.as_str())
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.status == SimulationStatus::Settled
    }
}
