#![forbid(unsafe_code)]

//! Legend generation for the active colour scale.
//!
//! A legend is [`LEGEND_STEPS`] evenly spaced samples of the active scale,
//! endpoints included. Only the first and last swatches carry text.
//!
//! | mode         | sampled        | first label  | last label  |
//! |--------------|----------------|--------------|-------------|
//! | sentiment    | `-1 → 1`       | `Negative`   | `Positive`  |
//! | subjectivity | `1 → 0`        | `Subjective` | `Objective` |
//!
//! Subjectivity runs high-to-low so each label sits on the end it names.

use beeswarm_core::event::EncodingMode;

use crate::color::Rgb;
use crate::encoding::ColorScales;

/// Number of swatches in every legend.
pub const LEGEND_STEPS: usize = 20;

/// One swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    /// Scale input this swatch was sampled at.
    pub value: f64,
    pub color: Rgb,
    /// Empty for interior swatches.
    pub label: &'static str,
}

/// Ordered swatches for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub mode: EncodingMode,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Number of swatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no swatches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in order, interior ones empty.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.label)
    }
}

/// Endpoint labels for `mode`.
#[must_use]
pub const fn endpoint_labels(mode: EncodingMode) -> (&'static str, &'static str) {
    match mode {
        EncodingMode::Sentiment => ("Negative", "Positive"),
        EncodingMode::Subjectivity => ("Subjective", "Objective"),
    }
}

/// Build the legend for `mode` from `scales`.
#[must_use]
pub fn legend_for(mode: EncodingMode, scales: &ColorScales) -> Legend {
    let scale = scales.scale(mode);
    let (from, to) = match mode {
        EncodingMode::Sentiment => (scale.domain_start(), scale.domain_end()),
        EncodingMode::Subjectivity => (scale.domain_end(), scale.domain_start()),
    };
    let (first, last) = endpoint_labels(mode);
    let step = (to - from) / (LEGEND_STEPS - 1) as f64;

    let entries = (0..LEGEND_STEPS)
        .map(|i| {
            // Pin the final sample so rounding never misses the endpoint.
            let value = if i == LEGEND_STEPS - 1 {
                to
            } else {
                from + step * i as f64
            };
            let label = match i {
                0 => first,
                i if i == LEGEND_STEPS - 1 => last,
                _ => "",
            };
            LegendEntry {
                value,
                color: scale.sample(value),
                label,
            }
        })
        .collect();

    Legend { mode, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{NEGATIVE, NEUTRAL, POSITIVE, SUBJECTIVE_BLUE};

    #[test]
    fn sentiment_legend_shape() {
        let legend = legend_for(EncodingMode::Sentiment, &ColorScales::default());
        assert_eq!(legend.len(), LEGEND_STEPS);
        assert_eq!(legend.entries[0].label, "Negative");
        assert_eq!(legend.entries[LEGEND_STEPS - 1].label, "Positive");
        assert!(legend.entries[1..LEGEND_STEPS - 1].iter().all(|e| e.label.is_empty()));
    }

    #[test]
    fn sentiment_legend_colours_run_red_to_green() {
        let legend = legend_for(EncodingMode::Sentiment, &ColorScales::default());
        assert_eq!(legend.entries[0].color, NEGATIVE);
        assert_eq!(legend.entries[LEGEND_STEPS - 1].color, POSITIVE);
        assert_eq!(legend.entries[0].value, -1.0);
        assert_eq!(legend.entries[LEGEND_STEPS - 1].value, 1.0);
    }

    #[test]
    fn subjectivity_legend_runs_subjective_to_objective() {
        let legend = legend_for(EncodingMode::Subjectivity, &ColorScales::default());
        assert_eq!(legend.len(), LEGEND_STEPS);
        assert_eq!(legend.entries[0].label, "Subjective");
        assert_eq!(legend.entries[0].color, SUBJECTIVE_BLUE);
        assert_eq!(legend.entries[LEGEND_STEPS - 1].label, "Objective");
        assert_eq!(legend.entries[LEGEND_STEPS - 1].color, NEUTRAL);
    }

    #[test]
    fn samples_are_monotonic() {
        let s = legend_for(EncodingMode::Sentiment, &ColorScales::default());
        assert!(s.entries.windows(2).all(|w| w[0].value < w[1].value));
        let o = legend_for(EncodingMode::Subjectivity, &ColorScales::default());
        assert!(o.entries.windows(2).all(|w| w[0].value > w[1].value));
    }

    #[test]
    fn labels_iterator_matches_entries() {
        let legend = legend_for(EncodingMode::Subjectivity, &ColorScales::default());
        let labels: Vec<_> = legend.labels().collect();
        assert_eq!(labels.len(), LEGEND_STEPS);
        assert_eq!(labels.iter().filter(|l| !l.is_empty()).count(), 2);
    }

    #[test]
    fn legend_is_pure() {
        let scales = ColorScales::default();
        assert_eq!(
            legend_for(EncodingMode::Sentiment, &scales),
            legend_for(EncodingMode::Sentiment, &scales)
        );
    }
}
