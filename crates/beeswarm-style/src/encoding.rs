#![forbid(unsafe_code)]

//! Encoding selector: which metric colours the marks.
//!
//! Colour is derived from a record's metric and the precomputed scales only;
//! nothing here reads or writes layout state, so switching modes never
//! disturbs the simulation.

use beeswarm_core::event::EncodingMode;
use beeswarm_core::record::Record;

use crate::color::Rgb;
use crate::legend::{Legend, legend_for};
use crate::scale::ColorScale;

/// The metric a mode reads from a record.
#[inline]
#[must_use]
pub fn metric_value(record: &Record, mode: EncodingMode) -> f64 {
    match mode {
        EncodingMode::Sentiment => record.sentiment,
        EncodingMode::Subjectivity => record.subjectivity,
    }
}

/// The pair of scales built for a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScales {
    pub sentiment: ColorScale,
    pub subjectivity: ColorScale,
}

impl Default for ColorScales {
    fn default() -> Self {
        Self {
            sentiment: ColorScale::sentiment(),
            subjectivity: ColorScale::subjectivity(),
        }
    }
}

impl ColorScales {
    /// Scale used by `mode`.
    #[must_use]
    pub fn scale(&self, mode: EncodingMode) -> &ColorScale {
        match mode {
            EncodingMode::Sentiment => &self.sentiment,
            EncodingMode::Subjectivity => &self.subjectivity,
        }
    }

    /// Fill colour of `record` under `mode`. O(number of breakpoints).
    #[must_use]
    pub fn color_of(&self, record: &Record, mode: EncodingMode) -> Rgb {
        self.scale(mode).sample(metric_value(record, mode))
    }
}

/// Active mode plus the legend drawn for it.
///
/// The legend is rebuilt only when the mode actually changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingSelector {
    mode: EncodingMode,
    legend: Legend,
}

impl EncodingSelector {
    /// Start in `mode`, building its legend from `scales`.
    #[must_use]
    pub fn new(mode: EncodingMode, scales: &ColorScales) -> Self {
        Self {
            mode,
            legend: legend_for(mode, scales),
        }
    }

    /// Active mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Legend for the active mode.
    #[inline]
    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Switch modes. Returns `true` if the mode changed (and the legend was
    /// rebuilt).
    pub fn set_mode(&mut self, mode: EncodingMode, scales: &ColorScales) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.legend = legend_for(mode, scales);
        true
    }

    /// Fill colour of `record` under the active mode.
    #[must_use]
    pub fn color_of(&self, record: &Record, scales: &ColorScales) -> Rgb {
        scales.color_of(record, self.mode)
    }
}
