use serde_json::json;

use earnlens_core::{Feed, FeedErrorKind, HealthState, Symbol, VerifyRequest};

use crate::cli::CheckArgs;
use crate::commands::{CommandReport, Feeds};
use crate::error::CliError;

pub async fn run(args: &CheckArgs, feeds: &Feeds) -> Result<CommandReport, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    // A rejected ticker is a finding of this command, not a failure of it.
    let accepted = match feeds
        .alphavantage
        .verify(VerifyRequest::new(symbol.clone()))
        .await
    {
        Ok(()) => true,
        Err(error) if error.kind() == FeedErrorKind::NotFound => false,
        Err(error) => return Err(error.into()),
    };

    let sources: [&dyn Feed; 3] = [&feeds.alphavantage, &feeds.edgar, &feeds.yahoo];
    let mut statuses = Vec::with_capacity(sources.len());
    for source in sources {
        statuses.push(source.health().await);
    }

    let data = json!({
        "symbol": symbol.as_str(),
        "ticker_accepted": accepted,
        "sources": statuses,
    });

    let mut lines = Vec::new();
    lines.push(format!(
        "ticker {symbol}: {}",
        if accepted { "accepted" } else { "rejected" }
    ));
    lines.push(String::from(" sources:"));
    for status in &statuses {
        let state = match status.state {
            HealthState::Reachable => "reachable",
            HealthState::Unreachable => "unreachable",
        };
        let provider = status.provider.as_str();
        match &status.detail {
            Some(detail) => lines.push(format!("  {provider:<14} {state} ({detail})")),
            None => lines.push(format!("  {provider:<14} {state}")),
        }
    }

    Ok(CommandReport { data, lines })
}
