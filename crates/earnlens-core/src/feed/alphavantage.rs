use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::feed::{
    fixtures, Feed, FeedCapabilities, FeedEndpoint, FeedError, HealthStatus, HistoryRequest,
    NextDisclosureRequest, PastDisclosuresRequest, VerifyRequest,
};
use crate::http::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{DailyQuote, DisclosureDates, IsoDate, ProviderId, QuoteHistory};

const QUERY_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage adapter: ticker verification and daily price history.
#[derive(Clone)]
pub struct AlphaVantageFeed {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    timeout_ms: u64,
}

impl Default for AlphaVantageFeed {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            api_key: std::env::var("EARNLENS_ALPHAVANTAGE_API_KEY")
                .unwrap_or_else(|_| String::from("demo")),
            timeout_ms: 10_000,
        }
    }
}

impl AlphaVantageFeed {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn is_real_client(&self) -> bool {
        !self.http_client.is_mock()
    }

    async fn execute(&self, endpoint: String) -> Result<String, FeedError> {
        let request = HttpRequest::get(endpoint).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                FeedError::unavailable(format!("alphavantage transport error: {}", error.message()))
            } else {
                FeedError::internal(format!("alphavantage transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            return Err(FeedError::unavailable(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    async fn verify_real(&self, req: &VerifyRequest) -> Result<(), FeedError> {
        let endpoint = format!(
            "{QUERY_URL}?function=SYMBOL_SEARCH&keywords={}&apikey={}",
            urlencoding::encode(req.symbol.as_str()),
            self.api_key
        );
        let body = self.execute(endpoint).await?;

        let search: SymbolSearchResponse = serde_json::from_str(&body).map_err(|error| {
            FeedError::internal(format!("failed to parse alphavantage search response: {error}"))
        })?;
        if let Some(note) = search.note {
            return Err(FeedError::rate_limited(note));
        }

        let matched = search
            .best_matches
            .iter()
            .any(|entry| entry.symbol.eq_ignore_ascii_case(req.symbol.as_str()));
        if matched {
            Ok(())
        } else {
            Err(FeedError::not_found(format!(
                "ticker '{}' not found",
                req.symbol
            )))
        }
    }

    async fn history_real(&self, req: &HistoryRequest) -> Result<QuoteHistory, FeedError> {
        let endpoint = format!(
            "{QUERY_URL}?function=TIME_SERIES_DAILY&symbol={}&outputsize=full&apikey={}",
            req.symbol.as_str(),
            self.api_key
        );
        let body = self.execute(endpoint).await?;
        parse_daily_history(&body, req.limit)
    }

    async fn verify_mock(&self, req: &VerifyRequest) -> Result<(), FeedError> {
        self.execute(format!("{QUERY_URL}?function=SYMBOL_SEARCH")).await?;
        let _ = req;
        Ok(())
    }

    async fn history_mock(&self, req: &HistoryRequest) -> Result<QuoteHistory, FeedError> {
        self.execute(format!("{QUERY_URL}?function=TIME_SERIES_DAILY"))
            .await?;
        Ok(fixtures::daily_history(&req.symbol, req.limit))
    }
}

impl Feed for AlphaVantageFeed {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn capabilities(&self) -> FeedCapabilities {
        FeedCapabilities::new(true, true, false, false)
    }

    fn verify<'a>(
        &'a self,
        req: VerifyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), FeedError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                self.verify_real(&req).await
            } else {
                self.verify_mock(&req).await
            }
        })
    }

    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteHistory, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                self.history_real(&req).await
            } else {
                self.history_mock(&req).await
            }
        })
    }

    fn past_disclosures<'a>(
        &'a self,
        _req: PastDisclosuresRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DisclosureDates, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            Err(FeedError::unsupported_endpoint(
                self.id(),
                FeedEndpoint::PastDisclosures,
            ))
        })
    }

    fn next_disclosure<'a>(
        &'a self,
        _req: NextDisclosureRequest,
    ) -> Pin<Box<dyn Future<Output = Result<IsoDate, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            Err(FeedError::unsupported_endpoint(
                self.id(),
                FeedEndpoint::NextDisclosure,
            ))
        })
    }

    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>> {
        Box::pin(async move {
            let probe = format!("{QUERY_URL}?function=SYMBOL_SEARCH&keywords=IBM&apikey=demo");
            match self.execute(probe).await {
                Ok(_) => HealthStatus::reachable(self.id()),
                Err(error) => HealthStatus::unreachable(self.id(), error.message()),
            }
        })
    }
}

fn parse_daily_history(body: &str, limit: usize) -> Result<QuoteHistory, FeedError> {
    let response: DailyResponse = serde_json::from_str(body).map_err(|error| {
        FeedError::internal(format!("failed to parse alphavantage daily response: {error}"))
    })?;

    if let Some(note) = response.note {
        return Err(FeedError::rate_limited(note));
    }
    if let Some(message) = response.error_message {
        return Err(FeedError::not_found(format!("alphavantage: {message}")));
    }

    let series = response.series.ok_or_else(|| {
        FeedError::internal("no daily time series in alphavantage response")
    })?;

    // BTreeMap iterates oldest first; keep the newest `limit` sessions.
    let mut entries: Vec<(IsoDate, DailyQuote)> = Vec::with_capacity(series.len());
    for (raw_date, bar) in series {
        let date = IsoDate::parse(&raw_date).map_err(|error| {
            FeedError::internal(format!("alphavantage series key: {error}"))
        })?;
        entries.push((
            date,
            DailyQuote::new(bar.open, bar.high, bar.low, bar.close, bar.volume),
        ));
    }
    let entries = entries.split_off(entries.len().saturating_sub(limit));

    QuoteHistory::from_entries(entries)
        .map_err(|error| FeedError::internal(format!("alphavantage series: {error}")))
}

#[derive(Debug, Clone, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBarPayload>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DailyBarPayload {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SymbolSearchMatch>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SymbolSearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
}
