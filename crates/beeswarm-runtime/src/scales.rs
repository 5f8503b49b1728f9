#![forbid(unsafe_code)]

//! Per-dataset scales: the category axis plus the colour scales.

use beeswarm_core::event::EncodingMode;
use beeswarm_core::record::Record;
use beeswarm_layout::CategoryAxis;
use beeswarm_style::{ColorScales, Rgb};

/// Scales derived from one dataset.
///
/// Pure function of the records (and their order) plus configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub axis: CategoryAxis,
    pub colors: ColorScales,
}

impl Scales {
    /// Build the axis for `records` over `inner_height` and pair it with
    /// `colors`.
    #[must_use]
    pub fn build(records: &[Record], inner_height: f64, colors: &ColorScales) -> Self {
        Self {
            axis: CategoryAxis::build(records, inner_height),
            colors: colors.clone(),
        }
    }

    /// Fill colour of `record` under `mode`.
    #[inline]
    #[must_use]
    pub fn color_of(&self, record: &Record, mode: EncodingMode) -> Rgb {
        self.colors.color_of(record, mode)
    }
}
