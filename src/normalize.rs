use crate::constants::subject_display_name;
use crate::error::{Result, TrackerError};
use crate::types::{NormalizedSeries, RawObservation};

/// Turn one raw observations payload into an ordered, null-free series.
///
/// Null-valued years are dropped, never interpolated. Survivors are sorted
/// by year ascending. The API promises at most one observation per year;
/// should duplicates appear anyway, the last one in sort order wins, which
/// keeps the years sequence strictly ascending.
///
/// The indicator name is read off the first raw element, so an empty
/// payload is `NoData` rather than a series with an undefined indicator.
pub fn normalize(raw: &[RawObservation], subject_code: &str) -> Result<NormalizedSeries> {
    let first = raw.first().ok_or_else(|| TrackerError::NoData {
        subject: subject_code.to_string(),
        indicator: "unknown".to_string(),
    })?;
    let indicator_name = first.indicator.value.clone();

    let mut observed: Vec<(&str, f64)> = raw
        .iter()
        .filter_map(|obs| obs.value.map(|v| (obs.date.as_str(), v)))
        .collect();
    observed.sort_by_key(|(year, _)| year_sort_key(year));

    let mut years: Vec<String> = Vec::with_capacity(observed.len());
    let mut values: Vec<f64> = Vec::with_capacity(observed.len());
    for (year, value) in observed {
        if years.last().is_some_and(|last| last == year) {
            // duplicate year: last-sorted-wins
            if let Some(slot) = values.last_mut() {
                *slot = value;
            }
        } else {
            years.push(year.to_string());
            values.push(value);
        }
    }

    Ok(NormalizedSeries {
        label: subject_display_name(subject_code),
        indicator_name,
        years,
        values,
    })
}

fn year_sort_key(year: &str) -> i32 {
    // API dates are 4-digit year strings; anything else sorts first
    year.parse::<i32>().unwrap_or(i32::MIN)
}
