#![forbid(unsafe_code)]

//! Continuous piecewise-linear colour scales.
//!
//! A [`ColorScale`] maps a number to a colour by locating the segment of the
//! (strictly increasing) domain that contains it and interpolating between
//! the two matching range colours. Inputs outside the domain clamp to the
//! nearest endpoint colour; `NaN` maps to the first colour.

use std::fmt;

use crate::color::{ColorParseError, Rgb};

/// Neutral grey shared by both stock scales.
pub const NEUTRAL: Rgb = Rgb::new(0xEC, 0xEC, 0xEC);
/// Negative sentiment endpoint (`red`).
pub const NEGATIVE: Rgb = Rgb::new(255, 0, 0);
/// Positive sentiment endpoint (`green`).
pub const POSITIVE: Rgb = Rgb::new(0, 128, 0);
/// Fully subjective endpoint.
pub const SUBJECTIVE_BLUE: Rgb = Rgb::new(0x44, 0x67, 0xC4);

/// Reasons a scale cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// Fewer than two breakpoints.
    TooFewStops(usize),
    /// Domain and range lengths differ.
    LengthMismatch { domain: usize, range: usize },
    /// Domain is not strictly increasing or contains a non-finite value.
    UnorderedDomain,
    /// A range colour failed to parse.
    Color(ColorParseError),
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewStops(n) => write!(f, "colour scale needs at least 2 stops, got {n}"),
            Self::LengthMismatch { domain, range } => {
                write!(f, "domain has {domain} stops but range has {range}")
            }
            Self::UnorderedDomain => f.write_str("domain must be finite and strictly increasing"),
            Self::Color(err) => write!(f, "bad range colour {err}"),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ColorParseError> for ScaleError {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

/// A continuous `f64 -> Rgb` mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: Vec<f64>,
    range: Vec<Rgb>,
}

impl ColorScale {
    /// Build a scale from matching breakpoints and colours.
    pub fn new(domain: Vec<f64>, range: Vec<Rgb>) -> Result<Self, ScaleError> {
        if domain.len() != range.len() {
            return Err(ScaleError::LengthMismatch {
                domain: domain.len(),
                range: range.len(),
            });
        }
        if domain.len() < 2 {
            return Err(ScaleError::TooFewStops(domain.len()));
        }
        let ordered = domain.iter().all(|d| d.is_finite())
            && domain.windows(2).all(|w| w[0] < w[1]);
        if !ordered {
            return Err(ScaleError::UnorderedDomain);
        }
        Ok(Self { domain, range })
    }

    /// Build a scale whose colours are given as strings (`#rrggbb`, names).
    pub fn from_strs<S: AsRef<str>>(domain: Vec<f64>, colors: &[S]) -> Result<Self, ScaleError> {
        let range = colors
            .iter()
            .map(|c| Rgb::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(domain, range)
    }

    /// `[-1, 0, 1] -> [red, #ECECEC, green]`.
    #[must_use]
    pub fn sentiment() -> Self {
        Self {
            domain: vec![-1.0, 0.0, 1.0],
            range: vec![NEGATIVE, NEUTRAL, POSITIVE],
        }
    }

    /// `[0, 1] -> [#ECECEC, #4467C4]`.
    #[must_use]
    pub fn subjectivity() -> Self {
        Self {
            domain: vec![0.0, 1.0],
            range: vec![NEUTRAL, SUBJECTIVE_BLUE],
        }
    }

    /// Breakpoints.
    #[must_use]
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Colours at each breakpoint.
    #[must_use]
    pub fn range(&self) -> &[Rgb] {
        &self.range
    }

    /// Lowest breakpoint.
    #[must_use]
    pub fn domain_start(&self) -> f64 {
        self.domain[0]
    }

    /// Highest breakpoint.
    #[must_use]
    pub fn domain_end(&self) -> f64 {
        self.domain[self.domain.len() - 1]
    }

    /// Evaluate the scale at `value`.
    #[must_use]
    pub fn sample(&self, value: f64) -> Rgb {
        let last = self.domain.len() - 1;
        if value.is_nan() || value <= self.domain[0] {
            return self.range[0];
        }
        if value >= self.domain[last] {
            return self.range[last];
        }
        // First breakpoint strictly above `value`; the segment ends there.
        let hi = self.domain.partition_point(|&d| d <= value);
        let lo = hi - 1;
        let t = (value - self.domain[lo]) / (self.domain[hi] - self.domain[lo]);
        self.range[lo].lerp(self.range[hi], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_hits_breakpoints() {
        let s = ColorScale::sentiment();
        assert_eq!(s.sample(-1.0), NEGATIVE);
        assert_eq!(s.sample(0.0), NEUTRAL);
        assert_eq!(s.sample(1.0), POSITIVE);
    }

    #[test]
    fn sentiment_interpolates_within_segment() {
        let s = ColorScale::sentiment();
        // Halfway between neutral (236,236,236) and green (0,128,0).
        assert_eq!(s.sample(0.5), Rgb::new(118, 182, 118));
        // Halfway between red and neutral.
        assert_eq!(s.sample(-0.5), Rgb::new(246, 118, 118));
    }

    #[test]
    fn out_of_domain_clamps() {
        let s = ColorScale::sentiment();
        assert_eq!(s.sample(-7.0), NEGATIVE);
        assert_eq!(s.sample(3.5), POSITIVE);
        assert_eq!(s.sample(f64::INFINITY), POSITIVE);
        assert_eq!(s.sample(f64::NEG_INFINITY), NEGATIVE);
        assert_eq!(s.sample(f64::NAN), NEGATIVE);
    }

    #[test]
    fn subjectivity_endpoints() {
        let s = ColorScale::subjectivity();
        assert_eq!(s.sample(0.0), NEUTRAL);
        assert_eq!(s.sample(1.0), SUBJECTIVE_BLUE);
        assert_eq!(s.domain_start(), 0.0);
        assert_eq!(s.domain_end(), 1.0);
    }

    #[test]
    fn subjectivity_point_nine_is_closer_to_blue() {
        let s = ColorScale::subjectivity();
        let c = s.sample(0.9);
        assert!(c.distance_sq(SUBJECTIVE_BLUE) < c.distance_sq(NEUTRAL));
        let c = s.sample(0.2);
        assert!(c.distance_sq(NEUTRAL) < c.distance_sq(SUBJECTIVE_BLUE));
    }

    #[test]
    fn from_strs_matches_stock_scale() {
        let s = ColorScale::from_strs(vec![-1.0, 0.0, 1.0], &["red", "#ECECEC", "green"]).unwrap();
        assert_eq!(s, ColorScale::sentiment());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = ColorScale::new(vec![0.0, 1.0], vec![NEUTRAL]).unwrap_err();
        assert_eq!(err, ScaleError::LengthMismatch { domain: 2, range: 1 });
    }

    #[test]
    fn rejects_single_stop() {
        let err = ColorScale::new(vec![0.0], vec![NEUTRAL]).unwrap_err();
        assert_eq!(err, ScaleError::TooFewStops(1));
    }

    #[test]
    fn rejects_unordered_domain() {
        let err = ColorScale::new(vec![1.0, 0.0], vec![NEUTRAL, POSITIVE]).unwrap_err();
        assert_eq!(err, ScaleError::UnorderedDomain);
        let err = ColorScale::new(vec![0.0, f64::NAN], vec![NEUTRAL, POSITIVE]).unwrap_err();
        assert_eq!(err, ScaleError::UnorderedDomain);
    }

    #[test]
    fn rejects_bad_colour_string() {
        let err = ColorScale::from_strs(vec![0.0, 1.0], &["#ECECEC", "nope"]).unwrap_err();
        assert!(matches!(err, ScaleError::Color(_)));
    }
}
