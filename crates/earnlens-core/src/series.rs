//! Price Series Builder: closing prices plus the windowed log return.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{DataFormatError, RangeError};
use crate::{InsufficientDataError, IsoDate, QuoteHistory};

/// Trailing window used for the 52-week trading range.
pub const TRADING_SESSIONS_PER_YEAR: usize = 252;

/// One dated row of the built price series.
///
/// `window_return` is the log return spanning the two trading sessions
/// adjacent to `date`: `ln(close one session more recent / close one session
/// older)`. The newest and oldest rows have no such window and carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: IsoDate,
    pub close: f64,
    pub window_return: Option<f64>,
}

/// Closing-price series ordered newest first, one row per source date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    by_date: HashMap<IsoDate, usize>,
}

impl PriceSeries {
    /// Derive the series from a quote history.
    ///
    /// The output keeps every input date, including the two boundary rows
    /// whose return is undefined. An empty history yields an empty series.
    pub fn build(history: &QuoteHistory) -> Result<Self, DataFormatError> {
        let mut closes = Vec::with_capacity(history.len());
        for (date, quote) in history.entries() {
            closes.push((*date, parse_quote_field(*date, "close", &quote.close)?));
        }

        let mut points = Vec::with_capacity(closes.len());
        for (index, (date, close)) in closes.iter().enumerate() {
            let newer = index.checked_sub(1).map(|i| closes[i].1);
            let older = closes.get(index + 1).map(|entry| entry.1);
            let window_return = match (newer, older) {
                (Some(newer), Some(older)) => Some((newer / older).ln()),
                _ => None,
            };
            points.push(PricePoint {
                date: *date,
                close: *close,
                window_return,
            });
        }

        let by_date = points
            .iter()
            .enumerate()
            .map(|(index, point)| (point.date, index))
            .collect();

        Ok(Self { points, by_date })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Exact-date lookup; `None` when the date never traded in the history.
    pub fn get(&self, date: IsoDate) -> Option<&PricePoint> {
        self.by_date.get(&date).map(|index| &self.points[*index])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trailing 52-week trading range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiftyTwoWeekRange {
    pub low: f64,
    pub last_close: f64,
    pub high: f64,
}

/// Range over the most recent 252 entries of the quote feed: the min of the
/// low column, the max of the high column, and the latest close.
pub fn fifty_two_week_range(history: &QuoteHistory) -> Result<FiftyTwoWeekRange, RangeError> {
    let entries = history.entries();
    if entries.is_empty() {
        return Err(InsufficientDataError.into());
    }

    let window = &entries[..entries.len().min(TRADING_SESSIONS_PER_YEAR)];
    let (latest_date, latest_quote) = &window[0];
    let last_close = parse_quote_field(*latest_date, "close", &latest_quote.close)?;

    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for (date, quote) in window {
        low = low.min(parse_quote_field(*date, "low", &quote.low)?);
        high = high.max(parse_quote_field(*date, "high", &quote.high)?);
    }

    Ok(FiftyTwoWeekRange {
        low,
        last_close,
        high,
    })
}

pub(crate) fn parse_quote_field(
    date: IsoDate,
    field: &'static str,
    raw: &str,
) -> Result<f64, DataFormatError> {
    // "nan" and "inf" parse as floats; a price field must hold a real number.
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DataFormatError {
            date,
            field,
            value: raw.to_owned(),
        })
}
