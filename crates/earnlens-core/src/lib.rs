//! # earnlens-core
//!
//! Disclosure-date alignment and price-reaction pipeline for the earnlens
//! research tool.
//!
//! ## Overview
//!
//! Given a daily quote history, a company's historical disclosure dates, and
//! its next expected disclosure date, the pipeline produces an aligned table
//! of disclosure date, closing price, and short-window log return, plus
//! descriptive statistics over the realized returns:
//!
//! 1. [`PriceSeries::build`] derives closes and windowed log returns from the
//!    raw quote history.
//! 2. [`align`] joins disclosure dates to the series by exact date and
//!    prepends the forthcoming disclosure as a placeholder row.
//! 3. [`SummaryStats::from_table`] summarizes the realized returns.
//!
//! Each stage is a pure function over its inputs; a stage either fully
//! succeeds or fails with its own error type, never returning a partial
//! result. The feed adapters that supply the inputs live in [`feed`] and are
//! thin single-attempt wrappers over their upstream APIs.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`align`] | Disclosure aligner and aligned-table types |
//! | [`domain`] | Symbols, dates, raw quote history |
//! | [`error`] | Pipeline error types |
//! | [`feed`] | Feed trait and provider adapters |
//! | [`format`] | Currency/percent cell formatting |
//! | [`http`] | GET transport abstraction (real and mock) |
//! | [`series`] | Price series builder and 52-week range |
//! | [`source`] | Provider identifiers |
//! | [`stats`] | Summary statistics over realized returns |

pub mod align;
pub mod domain;
pub mod error;
pub mod feed;
pub mod format;
pub mod http;
pub mod series;
pub mod source;
pub mod stats;

// Re-export commonly used types at the crate root for convenience

pub use align::{align, AlignedRow, AlignedTable, DisclosureDates};

pub use domain::{DailyQuote, IsoDate, QuoteHistory, Symbol};

pub use error::{
    AlignmentMismatchError, CoreError, DataFormatError, InsufficientDataError, RangeError,
    ValidationError,
};

pub use feed::{
    AlphaVantageFeed, EdgarFeed, Feed, FeedCapabilities, FeedEndpoint, FeedError, FeedErrorKind,
    HealthState, HealthStatus, HistoryRequest, NextDisclosureRequest, PastDisclosuresRequest,
    VerifyRequest, YahooFeed,
};

pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

pub use series::{
    fifty_two_week_range, FiftyTwoWeekRange, PricePoint, PriceSeries, TRADING_SESSIONS_PER_YEAR,
};

pub use source::ProviderId;

pub use stats::SummaryStats;
