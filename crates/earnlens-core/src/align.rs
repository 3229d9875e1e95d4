//! Disclosure Aligner: exact-date join of disclosure dates onto the series.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::AlignmentMismatchError;
use crate::{format, IsoDate, PriceSeries, ValidationError};

/// Historical disclosure dates in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisclosureDates {
    dates: Vec<IsoDate>,
}

impl DisclosureDates {
    /// Keep the given order; a repeated date is rejected so the exact-date
    /// join stays unambiguous.
    pub fn new(dates: Vec<IsoDate>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(dates.len());
        for date in &dates {
            if !seen.insert(*date) {
                return Err(ValidationError::DuplicateDisclosureDate { date: *date });
            }
        }
        Ok(Self { dates })
    }

    pub fn as_slice(&self) -> &[IsoDate] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = &IsoDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// One row of the aligned disclosure table.
///
/// The forthcoming disclosure is its own variant rather than sentinel cell
/// values; the `NEXT`/`DISCLOSURE` labels exist only in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignedRow {
    Upcoming {
        date: IsoDate,
    },
    Realized {
        date: IsoDate,
        close: f64,
        window_return: Option<f64>,
    },
}

impl AlignedRow {
    pub fn date(&self) -> IsoDate {
        match self {
            Self::Upcoming { date } | Self::Realized { date, .. } => *date,
        }
    }

    pub fn is_upcoming(&self) -> bool {
        matches!(self, Self::Upcoming { .. })
    }

    /// Closing-price cell as rendered in the report table.
    pub fn close_cell(&self) -> String {
        match self {
            Self::Upcoming { .. } => String::from("NEXT"),
            Self::Realized { close, .. } => format::currency(*close),
        }
    }

    /// Return cell as rendered in the report table; a boundary return with
    /// no window renders as the missing-value string.
    pub fn return_cell(&self) -> String {
        match self {
            Self::Upcoming { .. } => String::from("DISCLOSURE"),
            Self::Realized {
                window_return: Some(value),
                ..
            } => format::percent(*value),
            Self::Realized {
                window_return: None,
                ..
            } => format::percent(f64::NAN),
        }
    }
}

/// Disclosure dates joined to the price series, upcoming row first, then the
/// historical rows in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlignedTable {
    rows: Vec<AlignedRow>,
}

impl AlignedTable {
    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    /// Returns of realized rows whose window is defined, in row order.
    pub fn realized_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(|row| match row {
            AlignedRow::Realized {
                window_return: Some(value),
                ..
            } => Some(*value),
            _ => None,
        })
    }
}

/// Join every historical disclosure date to its exact price-series row and
/// prepend the forthcoming date as the placeholder row.
///
/// The join is exact-match only. Closes and returns are collected separately
/// and both tallies must equal the disclosure-date count, otherwise the whole
/// alignment fails; a partially matched table is never returned.
pub fn align(
    disclosures: &DisclosureDates,
    series: &PriceSeries,
    next_date: IsoDate,
) -> Result<AlignedTable, AlignmentMismatchError> {
    let mut closes = Vec::with_capacity(disclosures.len());
    let mut returns = Vec::with_capacity(disclosures.len());
    for date in disclosures.iter() {
        if let Some(point) = series.get(*date) {
            closes.push(point.close);
            returns.push(point.window_return);
        }
    }

    if closes.len() != disclosures.len() || returns.len() != disclosures.len() {
        return Err(AlignmentMismatchError {
            expected: disclosures.len(),
            closes_matched: closes.len(),
            returns_matched: returns.len(),
        });
    }

    let mut rows = Vec::with_capacity(disclosures.len() + 1);
    rows.push(AlignedRow::Upcoming { date: next_date });
    for (index, date) in disclosures.iter().enumerate() {
        rows.push(AlignedRow::Realized {
            date: *date,
            close: closes[index],
            window_return: returns[index],
        });
    }

    Ok(AlignedTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DailyQuote, QuoteHistory};

    fn date(input: &str) -> IsoDate {
        IsoDate::parse(input).expect("test date")
    }

    fn series(rows: &[(&str, &str)]) -> PriceSeries {
        let entries = rows
            .iter()
            .map(|(day, close)| {
                (
                    date(day),
                    DailyQuote::new("1.0", "2.0", "0.5", *close, "100"),
                )
            })
            .collect();
        PriceSeries::build(&QuoteHistory::from_entries(entries).expect("history"))
            .expect("series")
    }

    #[test]
    fn rejects_repeated_disclosure_date() {
        let err = DisclosureDates::new(vec![date("2020-04-28"), date("2020-04-28")])
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateDisclosureDate { .. }));
    }

    #[test]
    fn upcoming_row_leads_and_input_order_is_kept() {
        let series = series(&[
            ("2020-04-29", "10.0"),
            ("2020-04-28", "11.0"),
            ("2020-04-27", "12.0"),
            ("2020-04-24", "13.0"),
        ]);
        let disclosures =
            DisclosureDates::new(vec![date("2020-04-27"), date("2020-04-28")]).expect("dates");

        let table = align(&disclosures, &series, date("2020-05-01")).expect("aligned");

        assert!(table.rows()[0].is_upcoming());
        assert_eq!(table.rows()[0].date(), date("2020-05-01"));
        assert_eq!(table.rows()[1].date(), date("2020-04-27"));
        assert_eq!(table.rows()[2].date(), date("2020-04-28"));
    }

    #[test]
    fn unmatched_date_fails_the_whole_alignment() {
        let series = series(&[("2020-04-29", "10.0"), ("2020-04-28", "11.0")]);
        let disclosures =
            DisclosureDates::new(vec![date("2020-04-28"), date("2013-01-30")]).expect("dates");

        let err = align(&disclosures, &series, date("2020-05-01")).expect_err("must fail");
        assert_eq!(err.expected, 2);
        assert_eq!(err.closes_matched, 1);
        assert_eq!(err.returns_matched, 1);
    }

    #[test]
    fn boundary_return_renders_missing_value() {
        let series = series(&[("2020-04-29", "10.0"), ("2020-04-28", "11.0")]);
        let disclosures = DisclosureDates::new(vec![date("2020-04-29")]).expect("dates");

        let table = align(&disclosures, &series, date("2020-05-01")).expect("aligned");
        assert_eq!(table.rows()[1].return_cell(), "nan%");
    }

    #[test]
    fn series_is_untouched_by_alignment() {
        let series = series(&[
            ("2020-04-29", "10.0"),
            ("2020-04-28", "11.0"),
            ("2020-04-27", "12.0"),
        ]);
        let before = series.points().to_vec();
        let disclosures = DisclosureDates::new(vec![date("2020-04-28")]).expect("dates");

        align(&disclosures, &series, date("2020-05-01")).expect("aligned");
        assert_eq!(series.points(), before.as_slice());
    }
}
