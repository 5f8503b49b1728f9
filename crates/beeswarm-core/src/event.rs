#![forbid(unsafe_code)]

//! Events accepted by the engine and the colour-encoding mode.

use std::fmt;
use std::str::FromStr;

use crate::record::{Record, RecordId};

/// Which metric drives mark fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EncodingMode {
    /// Colour by sentiment polarity.
    #[default]
    Sentiment,
    /// Colour by subjectivity.
    Subjectivity,
}

impl EncodingMode {
    /// Both modes, in menu order.
    pub const ALL: [EncodingMode; 2] = [Self::Sentiment, Self::Subjectivity];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Subjectivity => "subjectivity",
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`EncodingMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEncodingModeError {
    pub value: String,
}

impl fmt::Display for ParseEncodingModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown encoding mode {:?} (expected \"sentiment\" or \"subjectivity\")",
            self.value
        )
    }
}

impl std::error::Error for ParseEncodingModeError {}

impl FromStr for EncodingMode {
    type Err = ParseEncodingModeError;

    /// Accepts the canonical names case-insensitively, plus `"true"` and
    /// `"false"` as sent by the boolean colour-by dropdown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("sentiment") || trimmed == "true" {
            Ok(Self::Sentiment)
        } else if trimmed.eq_ignore_ascii_case("subjectivity") || trimmed == "false" {
            Ok(Self::Subjectivity)
        } else {
            Err(ParseEncodingModeError {
                value: s.to_string(),
            })
        }
    }
}

/// A discrete input to the engine. Events are processed one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Replace the dataset and start a fresh layout.
    DatasetLoaded(Vec<Record>),
    /// Advance the simulation by one step (no-op once settled).
    Tick,
    /// Switch the fill-colour metric.
    SetEncodingMode(EncodingMode),
    /// Add the record to the selection, or remove it if already selected.
    ToggleSelection(RecordId),
}

impl Event {
    /// Short name used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DatasetLoaded(_) => "dataset_loaded",
            Self::Tick => "tick",
            Self::SetEncodingMode(_) => "set_encoding_mode",
            Self::ToggleSelection(_) => "toggle_selection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("sentiment".parse(), Ok(EncodingMode::Sentiment));
        assert_eq!("Subjectivity".parse(), Ok(EncodingMode::Subjectivity));
        assert_eq!(" SENTIMENT ".parse(), Ok(EncodingMode::Sentiment));
    }

    #[test]
    fn parses_dropdown_booleans() {
        assert_eq!("true".parse(), Ok(EncodingMode::Sentiment));
        assert_eq!("false".parse(), Ok(EncodingMode::Subjectivity));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "polarity".parse::<EncodingMode>().unwrap_err();
        assert_eq!(err.value, "polarity");
        assert!(err.to_string().contains("polarity"));
    }

    #[test]
    fn display_round_trips() {
        for mode in EncodingMode::ALL {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn default_mode_is_sentiment() {
        assert_eq!(EncodingMode::default(), EncodingMode::Sentiment);
    }

    #[test]
    fn event_kind_names() {
        assert_eq!(Event::Tick.kind(), "tick");
        assert_eq!(Event::DatasetLoaded(Vec::new()).kind(), "dataset_loaded");
        assert_eq!(
            Event::SetEncodingMode(EncodingMode::Subjectivity).kind(),
            "set_encoding_mode"
        );
    }
}
