//! Feed trait and request/response contracts for the provider adapters.
//!
//! Each adapter covers the endpoints its upstream actually serves:
//!
//! | Endpoint | Provider | Description |
//! |----------|----------|-------------|
//! | Verify | Alpha Vantage | Ticker accept/reject |
//! | History | Alpha Vantage | Daily OHLCV quote history |
//! | PastDisclosures | SEC EDGAR | Historical 10-K/10-Q filing dates |
//! | NextDisclosure | Yahoo Finance | Next expected earnings date |
//!
//! Every call is a single attempt; failures surface to the caller as a
//! [`FeedError`] and are never retried here.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{DisclosureDates, IsoDate, ProviderId, QuoteHistory, Symbol};

mod alphavantage;
mod edgar;
mod fixtures;
mod yahoo;

pub use alphavantage::AlphaVantageFeed;
pub use edgar::EdgarFeed;
pub use yahoo::YahooFeed;

/// Feed endpoint used for capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedEndpoint {
    Verify,
    History,
    PastDisclosures,
    NextDisclosure,
}

impl FeedEndpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::History => "history",
            Self::PastDisclosures => "past_disclosures",
            Self::NextDisclosure => "next_disclosure",
        }
    }
}

impl Display for FeedEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported endpoint matrix for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCapabilities {
    pub verify: bool,
    pub history: bool,
    pub past_disclosures: bool,
    pub next_disclosure: bool,
}

impl FeedCapabilities {
    pub const fn new(
        verify: bool,
        history: bool,
        past_disclosures: bool,
        next_disclosure: bool,
    ) -> Self {
        Self {
            verify,
            history,
            past_disclosures,
            next_disclosure,
        }
    }

    pub const fn supports(self, endpoint: FeedEndpoint) -> bool {
        match endpoint {
            FeedEndpoint::Verify => self.verify,
            FeedEndpoint::History => self.history,
            FeedEndpoint::PastDisclosures => self.past_disclosures,
            FeedEndpoint::NextDisclosure => self.next_disclosure,
        }
    }

    pub fn supported_endpoints(self) -> Vec<&'static str> {
        let mut values = Vec::with_capacity(4);
        if self.verify {
            values.push(FeedEndpoint::Verify.as_str());
        }
        if self.history {
            values.push(FeedEndpoint::History.as_str());
        }
        if self.past_disclosures {
            values.push(FeedEndpoint::PastDisclosures.as_str());
        }
        if self.next_disclosure {
            values.push(FeedEndpoint::NextDisclosure.as_str());
        }
        values
    }
}

/// Reachability state reported by the preflight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Reachable,
    Unreachable,
}

/// Per-provider preflight snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub provider: ProviderId,
    pub state: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthStatus {
    pub fn reachable(provider: ProviderId) -> Self {
        Self {
            provider,
            state: HealthState::Reachable,
            detail: None,
        }
    }

    pub fn unreachable(provider: ProviderId, detail: impl Into<String>) -> Self {
        Self {
            provider,
            state: HealthState::Unreachable,
            detail: Some(detail.into()),
        }
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    UnsupportedEndpoint,
    Unavailable,
    RateLimited,
    InvalidRequest,
    NotFound,
    Internal,
}

/// Structured feed error surfaced to the orchestration shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    kind: FeedErrorKind,
    message: String,
    retryable: bool,
}

impl FeedError {
    pub fn unsupported_endpoint(provider: ProviderId, endpoint: FeedEndpoint) -> Self {
        Self {
            kind: FeedErrorKind::UnsupportedEndpoint,
            message: format!("endpoint '{endpoint}' is not served by '{provider}'"),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FeedErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FeedErrorKind::UnsupportedEndpoint => "feed.unsupported_endpoint",
            FeedErrorKind::Unavailable => "feed.unavailable",
            FeedErrorKind::RateLimited => "feed.rate_limited",
            FeedErrorKind::InvalidRequest => "feed.invalid_request",
            FeedErrorKind::NotFound => "feed.not_found",
            FeedErrorKind::Internal => "feed.internal",
        }
    }
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FeedError {}

/// Ticker-validity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub symbol: Symbol,
}

impl VerifyRequest {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }
}

/// Daily price history request; `limit` bounds the sessions kept, newest
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub limit: usize,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, limit: usize) -> Result<Self, FeedError> {
        if limit == 0 {
            return Err(FeedError::invalid_request(
                "history request limit must be greater than zero",
            ));
        }
        Ok(Self { symbol, limit })
    }
}

/// Past disclosure dates request; `lookback` bounds the filing count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastDisclosuresRequest {
    pub symbol: Symbol,
    pub lookback: usize,
}

impl PastDisclosuresRequest {
    pub fn new(symbol: Symbol, lookback: usize) -> Result<Self, FeedError> {
        if lookback == 0 {
            return Err(FeedError::invalid_request(
                "disclosure lookback must be greater than zero",
            ));
        }
        Ok(Self { symbol, lookback })
    }
}

/// Next expected disclosure date request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDisclosureRequest {
    pub symbol: Symbol,
}

impl NextDisclosureRequest {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }
}

/// Provider adapter contract.
///
/// Implementations must be `Send + Sync`; the CLI shares them across its
/// command handlers. An adapter answers `unsupported_endpoint` for anything
/// outside its capability matrix.
pub trait Feed: Send + Sync {
    fn id(&self) -> ProviderId;

    fn capabilities(&self) -> FeedCapabilities;

    /// Accepts a ticker known to the provider; rejects with `NotFound`.
    fn verify<'a>(
        &'a self,
        req: VerifyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), FeedError>> + Send + 'a>>;

    /// Daily OHLCV history, newest first.
    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteHistory, FeedError>> + Send + 'a>>;

    /// Historical disclosure dates, newest first.
    fn past_disclosures<'a>(
        &'a self,
        req: PastDisclosuresRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DisclosureDates, FeedError>> + Send + 'a>>;

    /// Next expected disclosure date.
    fn next_disclosure<'a>(
        &'a self,
        req: NextDisclosureRequest,
    ) -> Pin<Box<dyn Future<Output = Result<IsoDate, FeedError>> + Send + 'a>>;

    /// Reachability preflight for the `check` command.
    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>>;
}
