//! Cell formatting for report tables.
//!
//! Sentinel strings live here at the rendering edge; the data model carries
//! tagged and optional values instead.

/// Format a price as dollars with two decimals and thousands separators.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return String::from("$nan");
    }

    let negative = value < 0.0;
    let rendered = format!("{:.2}", value.abs());
    let (whole, cents) = match rendered.split_once('.') {
        Some(parts) => parts,
        None => (rendered.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{cents}")
    } else {
        format!("${grouped}.{cents}")
    }
}

/// Format a decimal return as a percentage with two decimals.
///
/// An undefined value renders as the missing-value string `nan%`.
pub fn percent(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan%");
    }
    format!("{:.2}%", value * 100.0)
}

/// Parse a percent cell back to a decimal return.
///
/// Returns `None` for the missing-value string and for anything that is not
/// a percent-suffixed number.
pub fn parse_percent(cell: &str) -> Option<f64> {
    // "nan" would parse as a float; the missing-value cell must not.
    let body = cell.trim().strip_suffix('%')?;
    body.trim()
        .parse::<f64>()
        .ok()
        .filter(|points| points.is_finite())
        .map(|points| points / 100.0)
}
