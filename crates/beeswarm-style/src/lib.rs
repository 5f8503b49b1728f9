#![forbid(unsafe_code)]

//! Style: colours, colour scales, the encoding selector, and legends.

pub mod color;
pub mod encoding;
pub mod legend;
pub mod scale;

pub use color::{ColorParseError, Rgb};
pub use encoding::{ColorScales, EncodingSelector, metric_value};
pub use legend::{LEGEND_STEPS, Legend, LegendEntry, legend_for};
pub use scale::{ColorScale, ScaleError};
