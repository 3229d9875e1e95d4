//! Deterministic offline fixtures served by the adapters in mock mode.
//!
//! The three providers must agree with each other well enough for the whole
//! pipeline to run offline: every mock disclosure date lands inside the mock
//! quote history, which uses a calendar-day grid so exact-date joins always
//! hit.

use time::{Duration, OffsetDateTime};

use crate::{DailyQuote, DisclosureDates, IsoDate, QuoteHistory, Symbol};

/// Most recent session of every mock feed.
pub(crate) fn anchor() -> IsoDate {
    IsoDate::from_date(OffsetDateTime::now_utc().date())
}

pub(crate) fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(17_u64, |acc, byte| {
        acc.wrapping_mul(31).wrapping_add(byte as u64)
    })
}

pub(crate) fn daily_history(symbol: &Symbol, limit: usize) -> QuoteHistory {
    let seed = symbol_seed(symbol);
    let base = 90.0 + (seed % 400) as f64 / 10.0;
    let anchor = anchor().into_inner();

    let mut entries = Vec::with_capacity(limit);
    for index in 0..limit {
        let date = anchor
            .checked_sub(Duration::days(index as i64))
            .expect("mock dates stay within the calendar range");
        let wobble = ((seed + index as u64 * 7) % 19) as f64 / 10.0 - 0.9;
        let close = base + wobble;
        entries.push((
            IsoDate::from_date(date),
            DailyQuote::new(
                format!("{:.4}", close - 0.25),
                format!("{:.4}", close + 1.10),
                format!("{:.4}", close - 0.70),
                format!("{close:.4}"),
                (1_500_000 + index as u64 * 250).to_string(),
            ),
        ));
    }

    QuoteHistory::from_entries(entries).expect("mock history dates are unique")
}

pub(crate) fn past_disclosure_dates(symbol: &Symbol, lookback: usize) -> DisclosureDates {
    let _ = symbol;
    let anchor = anchor().into_inner();
    let dates = (0..lookback)
        .map(|quarter| {
            let date = anchor
                .checked_sub(Duration::days(30 + 91 * quarter as i64))
                .expect("mock dates stay within the calendar range");
            IsoDate::from_date(date)
        })
        .collect();

    DisclosureDates::new(dates).expect("mock disclosure dates are unique")
}

pub(crate) fn next_disclosure_date(symbol: &Symbol) -> IsoDate {
    let seed = symbol_seed(symbol);
    let date = anchor()
        .into_inner()
        .checked_add(Duration::days(14 + (seed % 21) as i64))
        .expect("mock dates stay within the calendar range");
    IsoDate::from_date(date)
}
