//! Shared fixtures for the behavior tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

pub use std::sync::Arc;

pub use earnlens_core::{
    align, fifty_two_week_range, format, AlignedRow, AlphaVantageFeed, DailyQuote,
    DisclosureDates, EdgarFeed, Feed, FeedEndpoint, FeedErrorKind, HistoryRequest, HttpClient,
    HttpError, HttpRequest, HttpResponse, IsoDate, NextDisclosureRequest,
    PastDisclosuresRequest, PriceSeries, QuoteHistory, SummaryStats, Symbol, VerifyRequest,
    YahooFeed,
};

pub fn date(input: &str) -> IsoDate {
    IsoDate::parse(input).expect("fixture date")
}

pub fn symbol(input: &str) -> Symbol {
    Symbol::parse(input).expect("fixture symbol")
}

/// Four GOOG sessions around the April 2020 disclosure, newest first in feed
/// order, as the daily provider serves them.
pub fn goog_history() -> QuoteHistory {
    QuoteHistory::from_entries(vec![
        (
            date("2020-04-29"),
            DailyQuote::new("1341.4600", "1359.9900", "1325.3400", "1341.4800", "3764617"),
        ),
        (
            date("2020-04-28"),
            DailyQuote::new("1287.9300", "1288.0500", "1232.2000", "1233.6700", "2951309"),
        ),
        (
            date("2020-04-27"),
            DailyQuote::new("1296.0000", "1296.1500", "1269.0000", "1275.8800", "1600563"),
        ),
        (
            date("2020-04-24"),
            DailyQuote::new("1261.1700", "1280.4000", "1249.4500", "1279.3100", "1640394"),
        ),
    ])
    .expect("fixture history")
}

/// The same four sessions as the raw Alpha Vantage response body.
pub const GOOG_DAILY_BODY: &str = r#"{
    "Meta Data": {"2. Symbol": "GOOG"},
    "Time Series (Daily)": {
        "2020-04-29": {"1. open": "1341.4600", "2. high": "1359.9900", "3. low": "1325.3400", "4. close": "1341.4800", "5. volume": "3764617"},
        "2020-04-28": {"1. open": "1287.9300", "2. high": "1288.0500", "3. low": "1232.2000", "4. close": "1233.6700", "5. volume": "2951309"},
        "2020-04-27": {"1. open": "1296.0000", "2. high": "1296.1500", "3. low": "1269.0000", "4. close": "1275.8800", "5. volume": "1600563"},
        "2020-04-24": {"1. open": "1261.1700", "2. high": "1280.4000", "3. low": "1249.4500", "4. close": "1279.3100", "5. volume": "1640394"}
    }
}"#;

/// Scripted transport: answers queued bodies in order and reports itself as a
/// real client so adapters take their live parse path.
pub struct FixtureHttpClient {
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl FixtureHttpClient {
    pub fn with_bodies(bodies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                bodies
                    .iter()
                    .map(|body| HttpResponse::ok_json(*body))
                    .collect(),
            ),
        })
    }

    pub fn with_status(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([HttpResponse {
                status,
                body: body.to_owned(),
            }])),
        })
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let _ = request;
        let next = self
            .responses
            .lock()
            .expect("fixture queue should not be poisoned")
            .pop_front();
        Box::pin(async move {
            next.ok_or_else(|| HttpError::non_retryable("fixture response queue exhausted"))
        })
    }
}
