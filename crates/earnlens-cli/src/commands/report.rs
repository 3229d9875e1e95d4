use serde_json::json;

use earnlens_core::{
    align, fifty_two_week_range, format, Feed, HistoryRequest, NextDisclosureRequest,
    PastDisclosuresRequest, PriceSeries, SummaryStats, Symbol, VerifyRequest,
};

use crate::cli::ReportArgs;
use crate::commands::{CommandReport, Feeds};
use crate::error::CliError;

pub async fn run(args: &ReportArgs, feeds: &Feeds) -> Result<CommandReport, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    feeds
        .alphavantage
        .verify(VerifyRequest::new(symbol.clone()))
        .await?;

    let history = feeds
        .alphavantage
        .daily_history(HistoryRequest::new(symbol.clone(), args.sessions)?)
        .await?;
    let past = feeds
        .edgar
        .past_disclosures(PastDisclosuresRequest::new(symbol.clone(), args.lookback)?)
        .await?;
    let next = feeds
        .yahoo
        .next_disclosure(NextDisclosureRequest::new(symbol.clone()))
        .await?;

    let series = PriceSeries::build(&history)?;
    let table = align(&past, &series, next)?;
    let summary = SummaryStats::from_table(&table)?;
    let range = fifty_two_week_range(&history)?;

    let data = json!({
        "symbol": symbol.as_str(),
        "next_disclosure": next,
        "rows": table.rows(),
        "summary": summary,
        "fifty_two_week": {
            "low": range.low,
            "last_close": range.last_close,
            "high": range.high,
        },
    });

    let mut lines = Vec::new();
    lines.push(format!(
        "{symbol} disclosure reactions (next expected: {next})"
    ));
    lines.push(String::new());
    lines.push(format!(
        " {:<12} {:>12} {:>12}",
        "disclosure", "close", "reaction"
    ));
    for row in table.rows() {
        lines.push(format!(
            " {:<12} {:>12} {:>12}",
            row.date().to_string(),
            row.close_cell(),
            row.return_cell()
        ));
    }
    lines.push(String::new());
    lines.push(String::from(" summary"));
    for (label, cell) in summary.rows() {
        lines.push(format!(" {label:<16} {cell:>10}"));
    }
    lines.push(String::new());
    lines.push(format!(
        " 52-week range {} to {}, last close {}",
        format::currency(range.low),
        format::currency(range.high),
        format::currency(range.last_close)
    ));

    Ok(CommandReport { data, lines })
}
