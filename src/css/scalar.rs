//! CSS scalar values: [`Length`] (pixels or sizing keyword) and [`TrackSize`].
//!
//! Both serialize to the storage format as either a bare number (pixels) or a
//! lowercase keyword string, e.g. `120`, `"fill"`, `"auto"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis a length is rendered on. Only matters for the `screen` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A length: pixels, or one of the reserved sizing keywords.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr", into = "ScalarRepr")]
pub enum Length {
    /// Absolute pixel count.
    Px(f64),
    /// Fill the parent (`100%`).
    Fill,
    /// Shrink to content (`fit-content`).
    Auto,
    /// Full viewport extent (`100vh` / `100vw`).
    Screen,
}

impl Length {
    /// Render the CSS value for this length on the given axis.
    pub fn to_css(&self, axis: Axis) -> String {
        match self {
            Length::Px(v) => px(*v),
            Length::Fill => "100%".into(),
            Length::Auto => "fit-content".into(),
            Length::Screen => match axis {
                Axis::Horizontal => "100vw".into(),
                Axis::Vertical => "100vh".into(),
            },
        }
    }

    /// Returns the pixel value, if this is a pixel length.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            Length::Px(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Length {
    fn from(v: f64) -> Self {
        Length::Px(v)
    }
}

/// Size of one grid track: pixels, or `auto` (an equal fraction, `1fr`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr", into = "ScalarRepr")]
pub enum TrackSize {
    Px(f64),
    Auto,
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSize::Px(v) => write!(f, "{}px", v),
            TrackSize::Auto => write!(f, "1fr"),
        }
    }
}

/// Format a pixel value: `10px`, `12.5px`.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Storage representation shared by [`Length`] and [`TrackSize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Number(f64),
    Keyword(String),
}

impl TryFrom<ScalarRepr> for Length {
    type Error = String;

    fn try_from(repr: ScalarRepr) -> Result<Self, Self::Error> {
        match repr {
            ScalarRepr::Number(n) => Ok(Length::Px(n)),
            ScalarRepr::Keyword(k) => match k.as_str() {
                "fill" => Ok(Length::Fill),
                "auto" => Ok(Length::Auto),
                "screen" => Ok(Length::Screen),
                other => Err(format!("expected number, 'fill', 'auto' or 'screen', got '{other}'")),
            },
        }
    }
}

impl From<Length> for ScalarRepr {
    fn from(length: Length) -> Self {
        match length {
            Length::Px(v) => ScalarRepr::Number(v),
            Length::Fill => ScalarRepr::Keyword("fill".into()),
            Length::Auto => ScalarRepr::Keyword("auto".into()),
            Length::Screen => ScalarRepr::Keyword("screen".into()),
        }
    }
}

impl TryFrom<ScalarRepr> for TrackSize {
    type Error = String;

    fn try_from(repr: ScalarRepr) -> Result<Self, Self::Error> {
        match repr {
            ScalarRepr::Number(n) => Ok(TrackSize::Px(n)),
            ScalarRepr::Keyword(k) if k == "auto" => Ok(TrackSize::Auto),
            ScalarRepr::Keyword(k) => Err(format!("expected number or 'auto', got '{k}'")),
        }
    }
}

impl From<TrackSize> for ScalarRepr {
    fn from(size: TrackSize) -> Self {
        match size {
            TrackSize::Px(v) => ScalarRepr::Number(v),
            TrackSize::Auto => ScalarRepr::Keyword("auto".into()),
        }
    }
}
