mod check;
mod dates;
mod range;
mod report;

use std::sync::Arc;

use serde_json::Value;

use earnlens_core::{
    AlphaVantageFeed, EdgarFeed, HttpClient, NoopHttpClient, ReqwestHttpClient, YahooFeed,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Rendered payload of one command: the JSON shape plus the text lines the
/// table format prints.
pub struct CommandReport {
    pub data: Value,
    pub lines: Vec<String>,
}

/// The three provider adapters every command draws from.
pub struct Feeds {
    pub alphavantage: AlphaVantageFeed,
    pub edgar: EdgarFeed,
    pub yahoo: YahooFeed,
}

impl Feeds {
    fn new(mock: bool, timeout_ms: u64) -> Self {
        let client: Arc<dyn HttpClient> = if mock {
            Arc::new(NoopHttpClient)
        } else {
            Arc::new(ReqwestHttpClient::new())
        };

        Self {
            alphavantage: AlphaVantageFeed::with_http_client(client.clone())
                .with_timeout_ms(timeout_ms),
            edgar: EdgarFeed::with_http_client(client.clone()).with_timeout_ms(timeout_ms),
            yahoo: YahooFeed::with_http_client(client).with_timeout_ms(timeout_ms),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandReport, CliError> {
    let feeds = Feeds::new(cli.mock, cli.timeout_ms);

    match &cli.command {
        Command::Report(args) => report::run(args, &feeds).await,
        Command::Dates(args) => dates::run(args, &feeds).await,
        Command::Range(args) => range::run(args, &feeds).await,
        Command::Check(args) => check::run(args, &feeds).await,
    }
}
