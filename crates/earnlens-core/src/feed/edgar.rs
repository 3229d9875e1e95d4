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
use crate::{DisclosureDates, IsoDate, ProviderId, QuoteHistory, Symbol};

const TICKER_INDEX_URL: &str = "https://www.sec.gov/files/company_tickers.json";
const SUBMISSIONS_URL: &str = "https://data.sec.gov/submissions";

/// SEC EDGAR adapter: historical disclosure dates from 10-K/10-Q filings.
///
/// Periodic-report filing dates stand in for the disclosure dates; a company
/// with no 10-series filings on record cannot be tracked.
#[derive(Clone)]
pub struct EdgarFeed {
    http_client: Arc<dyn HttpClient>,
    user_agent: String,
    timeout_ms: u64,
}

impl Default for EdgarFeed {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            // EDGAR rejects requests without a descriptive User-Agent.
            user_agent: std::env::var("EARNLENS_EDGAR_USER_AGENT")
                .unwrap_or_else(|_| String::from("earnlens/0.1.0 (personal research)")),
            timeout_ms: 10_000,
        }
    }
}

impl EdgarFeed {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
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
        let request = HttpRequest::get(endpoint)
            .with_header("user-agent", &self.user_agent)
            .with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                FeedError::unavailable(format!("edgar transport error: {}", error.message()))
            } else {
                FeedError::internal(format!("edgar transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            return Err(FeedError::unavailable(format!(
                "edgar returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    async fn past_real(&self, req: &PastDisclosuresRequest) -> Result<DisclosureDates, FeedError> {
        let index_body = self.execute(String::from(TICKER_INDEX_URL)).await?;
        let cik = resolve_cik(&index_body, &req.symbol)?;

        let submissions_body = self
            .execute(format!("{SUBMISSIONS_URL}/CIK{cik:010}.json"))
            .await?;
        let dates = parse_filing_dates(&submissions_body, &req.symbol, req.lookback)?;

        DisclosureDates::new(dates)
            .map_err(|error| FeedError::internal(format!("edgar filings: {error}")))
    }

    async fn past_mock(&self, req: &PastDisclosuresRequest) -> Result<DisclosureDates, FeedError> {
        self.execute(String::from(TICKER_INDEX_URL)).await?;
        Ok(fixtures::past_disclosure_dates(&req.symbol, req.lookback))
    }
}

impl Feed for EdgarFeed {
    fn id(&self) -> ProviderId {
        ProviderId::Edgar
    }

    fn capabilities(&self) -> FeedCapabilities {
        FeedCapabilities::new(false, false, true, false)
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
        req: PastDisclosuresRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DisclosureDates, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                self.past_real(&req).await
            } else {
                self.past_mock(&req).await
            }
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
            match self.execute(String::from(TICKER_INDEX_URL)).await {
                Ok(_) => HealthStatus::reachable(self.id()),
                Err(error) => HealthStatus::unreachable(self.id(), error.message()),
            }
        })
    }
}

fn resolve_cik(body: &str, symbol: &Symbol) -> Result<u64, FeedError> {
    let index: BTreeMap<String, TickerRecord> = serde_json::from_str(body).map_err(|error| {
        FeedError::internal(format!("failed to parse edgar ticker index: {error}"))
    })?;

    index
        .values()
        .find(|record| record.ticker.eq_ignore_ascii_case(symbol.as_str()))
        .map(|record| record.cik_str)
        .ok_or_else(|| FeedError::not_found(format!("ticker '{symbol}' not on the EDGAR index")))
}

fn parse_filing_dates(
    body: &str,
    symbol: &Symbol,
    lookback: usize,
) -> Result<Vec<IsoDate>, FeedError> {
    let submissions: SubmissionsResponse = serde_json::from_str(body).map_err(|error| {
        FeedError::internal(format!("failed to parse edgar submissions: {error}"))
    })?;

    let recent = submissions.filings.recent;
    let mut dates = Vec::new();
    for (form, raw_date) in recent.form.iter().zip(recent.filing_date.iter()) {
        if !form.starts_with("10") {
            continue;
        }
        let date = IsoDate::parse(raw_date)
            .map_err(|error| FeedError::internal(format!("edgar filing date: {error}")))?;
        // A report and its same-day amendment collapse into one disclosure.
        if dates.contains(&date) {
            continue;
        }
        dates.push(date);
        if dates.len() == lookback {
            break;
        }
    }

    if dates.is_empty() {
        return Err(FeedError::not_found(format!(
            "no 10-series filings on record for '{symbol}'"
        )));
    }

    Ok(dates)
}

#[derive(Debug, Clone, Deserialize)]
struct TickerRecord {
    cik_str: u64,
    ticker: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SubmissionsResponse {
    filings: SubmissionsFilings,
}

#[derive(Debug, Clone, Deserialize)]
struct SubmissionsFilings {
    recent: RecentFilings,
}

#[derive(Debug, Clone, Deserialize)]
struct RecentFilings {
    #[serde(default)]
    form: Vec<String>,
    #[serde(rename = "filingDate", default)]
    filing_date: Vec<String>,
}
