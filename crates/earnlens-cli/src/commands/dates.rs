use serde_json::json;

use earnlens_core::{Feed, NextDisclosureRequest, PastDisclosuresRequest, Symbol};

use crate::cli::DatesArgs;
use crate::commands::{CommandReport, Feeds};
use crate::error::CliError;

pub async fn run(args: &DatesArgs, feeds: &Feeds) -> Result<CommandReport, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let past = feeds
        .edgar
        .past_disclosures(PastDisclosuresRequest::new(symbol.clone(), args.lookback)?)
        .await?;
    let next = feeds
        .yahoo
        .next_disclosure(NextDisclosureRequest::new(symbol.clone()))
        .await?;

    let data = json!({
        "symbol": symbol.as_str(),
        "next_disclosure": next,
        "past_disclosures": past.as_slice(),
    });

    let mut lines = Vec::new();
    lines.push(format!("{symbol} next expected disclosure: {next}"));
    lines.push(String::from(" past disclosures:"));
    for date in past.iter() {
        lines.push(format!("  - {date}"));
    }

    Ok(CommandReport { data, lines })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_dates_lists_the_lookback_window() {
        let feeds = Feeds::new(true, 1_000);
        let args = DatesArgs {
            symbol: String::from("aapl"),
            lookback: 8,
        };

        let report = run(&args, &feeds).await.expect("mock dates");

        assert_eq!(
            report.data["past_disclosures"].as_array().map(Vec::len),
            Some(8)
        );
        assert!(report.lines[0].contains("next expected disclosure"));
    }
}
