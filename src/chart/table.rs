use crate::types::NormalizedSeries;

/// One row of the tabular listing. `value` stays optional because the
/// table path must also cope with unfiltered raw input without panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub year: String,
    pub value: Option<f64>,
}

/// Build table rows from the main series, one per (year, value) pair
pub fn build_rows(series: &NormalizedSeries) -> Vec<TableRow> {
    series
        .years
        .iter()
        .zip(series.values.iter())
        .map(|(year, value)| TableRow {
            year: year.clone(),
            value: Some(*value),
        })
        .collect()
}

/// Format a cell value with thousands separators, or a placeholder
/// when the value is absent.
pub fn format_value(value: Option<f64>) -> String {
    let value = match value {
        Some(v) => v,
        None => return "N/A".to_string(),
    };

    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let frac = ((abs - abs.trunc()) * 100.0).round() as u64;

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 0 {
        out.push_str(&format!(".{:02}", frac));
    }
    out
}
