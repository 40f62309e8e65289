use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One data point as returned by the World Bank observations array.
/// The API pads missing years with explicit nulls, so `value` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: Option<f64>,
    pub indicator: IndicatorRef,
}

/// Nested indicator descriptor carried on every observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRef {
    #[serde(default)]
    pub id: String,
    pub value: String,
}

/// An ordered, null-free series ready for display.
///
/// Invariants: `years` and `values` have equal length, `years` is strictly
/// ascending, and no value is missing (nulls are dropped during
/// normalization, never interpolated).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    /// Display name of the subject, e.g. "Ethiopia"
    pub label: String,
    /// Human-readable indicator name from the API, e.g. "GDP (current US$)"
    pub indicator_name: String,
    pub years: Vec<String>,
    pub values: Vec<f64>,
}

/// Inclusive year range sent to the API as `date={start}:{end}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// The "years" control: a trailing window of N years, or everything
/// the API has (back to 1960).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearWindow {
    Years(u32),
    All,
}

impl YearWindow {
    pub fn resolve(&self, current_year: i32) -> YearRange {
        let start = match self {
            // counts beyond i32 saturate instead of wrapping
            YearWindow::Years(n) => {
                current_year.saturating_sub(i32::try_from(*n).unwrap_or(i32::MAX))
            }
            YearWindow::All => constants::EARLIEST_YEAR,
        };
        YearRange {
            start,
            end: current_year,
        }
    }
}

impl FromStr for YearWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearWindow::All);
        }
        s.parse::<u32>()
            .map(YearWindow::Years)
            .map_err(|_| format!("expected a year count or 'all', got '{}'", s))
    }
}

/// A full set of control values; any change triggers one update cycle
#[derive(Debug, Clone)]
pub struct Controls {
    /// World Bank indicator code
    pub indicator: String,
    pub window: YearWindow,
    /// Comparison subject code, or None for the "none" sentinel
    pub compare: Option<String>,
}
