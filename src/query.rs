//! Search query types and their mapping to wire-level request parameters.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Orientation constraint forwarded to the search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Any,
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    /// Wire value for the `orientation` query parameter.
    ///
    /// `Any` returns `None` and the parameter is omitted entirely.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Landscape => Some("landscape"),
            Self::Portrait => Some("portrait"),
            Self::Squarish => Some("squarish"),
        }
    }
}

/// Dominant-color constraint forwarded to the search endpoint.
///
/// The twelve fixed tags the endpoint understands, plus `Any`. Human-facing
/// labels (e.g. "black-and-white" on the CLI) map to the wire values here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilter {
    #[default]
    Any,
    BlackAndWhite,
    Black,
    White,
    Yellow,
    Orange,
    Red,
    Purple,
    Magenta,
    Green,
    Teal,
    Blue,
}

impl ColorFilter {
    /// Wire value for the `color` query parameter.
    ///
    /// `Any` returns `None` and the parameter is omitted entirely.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::BlackAndWhite => Some("black_and_white"),
            Self::Black => Some("black"),
            Self::White => Some("white"),
            Self::Yellow => Some("yellow"),
            Self::Orange => Some("orange"),
            Self::Red => Some("red"),
            Self::Purple => Some("purple"),
            Self::Magenta => Some("magenta"),
            Self::Green => Some("green"),
            Self::Teal => Some("teal"),
            Self::Blue => Some("blue"),
        }
    }
}

/// One caller-supplied search request. Constructed once per collection run
/// and read-only for its duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term. Must be non-empty.
    pub term: String,
    /// Orientation constraint, `Any` to skip.
    pub orientation: Orientation,
    /// Dominant-color constraint, `Any` to skip.
    pub color: ColorFilter,
    /// Minimum accepted pixel width. Zero disables the filter.
    pub min_width: u32,
    /// Minimum accepted pixel height. Zero disables the filter.
    pub min_height: u32,
    /// Cap on the number of records the run may accumulate. The collector
    /// clamps this to at least 1.
    pub max_results: usize,
}

impl SearchQuery {
    /// Build a query with the default constraints: no orientation, no color,
    /// no dimension minimums, at most 20 results.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            orientation: Orientation::Any,
            color: ColorFilter::Any,
            min_width: 0,
            min_height: 0,
            max_results: 20,
        }
    }

    /// Set the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the minimum accepted dimensions.
    pub fn with_min_dimensions(mut self, min_width: u32, min_height: u32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set the orientation constraint.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the dominant-color constraint.
    pub fn with_color(mut self, color: ColorFilter) -> Self {
        self.color = color;
        self
    }
}
