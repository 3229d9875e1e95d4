use serde_json::json;

use earnlens_core::{
    fifty_two_week_range, format, Feed, HistoryRequest, Symbol, TRADING_SESSIONS_PER_YEAR,
};

use crate::cli::RangeArgs;
use crate::commands::{CommandReport, Feeds};
use crate::error::CliError;

pub async fn run(args: &RangeArgs, feeds: &Feeds) -> Result<CommandReport, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let history = feeds
        .alphavantage
        .daily_history(HistoryRequest::new(
            symbol.clone(),
            TRADING_SESSIONS_PER_YEAR,
        )?)
        .await?;
    let range = fifty_two_week_range(&history)?;

    let low = format::currency(range.low);
    let high = format::currency(range.high);
    let last_close = format::currency(range.last_close);

    let data = json!({
        "symbol": symbol.as_str(),
        "low": range.low,
        "last_close": range.last_close,
        "high": range.high,
        "cells": { "low": low, "last_close": last_close, "high": high },
    });

    let lines = vec![
        format!("{symbol} 52-week range"),
        format!(" low        {low:>12}"),
        format!(" high       {high:>12}"),
        format!(" last close {last_close:>12}"),
    ];

    Ok(CommandReport { data, lines })
}
