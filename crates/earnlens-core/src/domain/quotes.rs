use serde::{Deserialize, Serialize};

use crate::{IsoDate, ValidationError};

/// One trading day's quote fields as returned by the daily price feed.
///
/// Values stay in their wire form (decimal strings). Numeric parsing is
/// deferred to the stage that consumes a field, so a malformed value fails
/// there as a `DataFormatError` naming the date and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl DailyQuote {
    pub fn new(
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: volume.into(),
        }
    }
}

/// Daily quote history ordered newest first, one entry per calendar date.
///
/// Immutable once constructed; the pipeline stages only read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteHistory {
    entries: Vec<(IsoDate, DailyQuote)>,
}

impl QuoteHistory {
    /// Build from `(date, quote)` pairs in any order.
    ///
    /// Entries are sorted newest first; a repeated date is rejected because
    /// the date is the unique key of the feed.
    pub fn from_entries(
        mut entries: Vec<(IsoDate, DailyQuote)>,
    ) -> Result<Self, ValidationError> {
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        for pair in entries.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(ValidationError::DuplicateQuoteDate { date: pair[0].0 });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(IsoDate, DailyQuote)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&(IsoDate, DailyQuote)> {
        self.entries.first()
    }
}
