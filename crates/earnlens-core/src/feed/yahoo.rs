use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::feed::{
    fixtures, Feed, FeedCapabilities, FeedEndpoint, FeedError, HealthStatus, HistoryRequest,
    NextDisclosureRequest, PastDisclosuresRequest, VerifyRequest,
};
use crate::http::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{DisclosureDates, IsoDate, ProviderId, QuoteHistory};

const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

/// Yahoo Finance adapter: next expected earnings date from the calendar
/// events module of the quote summary.
#[derive(Clone)]
pub struct YahooFeed {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for YahooFeed {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            timeout_ms: 10_000,
        }
    }
}

impl YahooFeed {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            ..Self::default()
        }
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
                FeedError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                FeedError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })?;

        if response.status == 401 || response.status == 403 {
            return Err(FeedError::unavailable(format!(
                "yahoo denied the request with status {}",
                response.status
            )));
        }
        if !response.is_success() {
            return Err(FeedError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    async fn next_real(&self, req: &NextDisclosureRequest) -> Result<IsoDate, FeedError> {
        let endpoint = format!(
            "{QUOTE_SUMMARY_URL}/{}?modules=calendarEvents",
            urlencoding::encode(req.symbol.as_str())
        );
        let body = self.execute(endpoint).await?;
        parse_next_disclosure(&body, req)
    }

    async fn next_mock(&self, req: &NextDisclosureRequest) -> Result<IsoDate, FeedError> {
        self.execute(format!("{QUOTE_SUMMARY_URL}/{}", req.symbol))
            .await?;
        Ok(fixtures::next_disclosure_date(&req.symbol))
    }
}

impl Feed for YahooFeed {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn capabilities(&self) -> FeedCapabilities {
        FeedCapabilities::new(false, false, false, true)
    }

    fn verify<'a>(
        &'a self,
        _req: VerifyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), FeedError>> + Send + 'a>> {
        Box::pin(async move {
            Err(FeedError::unsupported_endpoint(
                self.id(),
                FeedEndpoint::Verify,
            ))
        })
    }

    fn daily_history<'a>(
        &'a self,
        _req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteHistory, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            Err(FeedError::unsupported_endpoint(
                self.id(),
                FeedEndpoint::History,
            ))
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
        req: NextDisclosureRequest,
    ) -> Pin<Box<dyn Future<Output = Result<IsoDate, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                self.next_real(&req).await
            } else {
                self.next_mock(&req).await
            }
        })
    }

    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>> {
        Box::pin(async move {
            let probe = format!("{QUOTE_SUMMARY_URL}/AAPL?modules=calendarEvents");
            match self.execute(probe).await {
                Ok(_) => HealthStatus::reachable(self.id()),
                Err(error) => HealthStatus::unreachable(self.id(), error.message()),
            }
        })
    }
}

fn parse_next_disclosure(body: &str, req: &NextDisclosureRequest) -> Result<IsoDate, FeedError> {
    let response: QuoteSummaryResponse = serde_json::from_str(body).map_err(|error| {
        FeedError::internal(format!("failed to parse yahoo quote summary: {error}"))
    })?;

    let summary = response.quote_summary;
    if let Some(error) = summary.error {
        return Err(FeedError::not_found(format!(
            "yahoo quote summary error for '{}': {}",
            req.symbol, error.description
        )));
    }

    summary
        .result
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| entry.calendar_events)
        .filter_map(|events| events.earnings)
        .flat_map(|earnings| earnings.earnings_date)
        .find_map(|stamp| stamp.fmt)
        .ok_or_else(|| {
            FeedError::not_found(format!(
                "no upcoming earnings date published for '{}'",
                req.symbol
            ))
        })
        .and_then(|raw| {
            IsoDate::parse(&raw)
                .map_err(|error| FeedError::internal(format!("yahoo earnings date: {error}")))
        })
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryData {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<QuoteSummaryError>,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryError {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "calendarEvents")]
    calendar_events: Option<CalendarEvents>,
}

#[derive(Debug, Clone, Deserialize)]
struct CalendarEvents {
    earnings: Option<EarningsCalendar>,
}

#[derive(Debug, Clone, Deserialize)]
struct EarningsCalendar {
    #[serde(rename = "earningsDate", default)]
    earnings_date: Vec<FormattedStamp>,
}

#[derive(Debug, Clone, Deserialize)]
struct FormattedStamp {
    fmt: Option<String>,
}
