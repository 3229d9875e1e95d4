//! Behavior tests for the provider adapters.
//!
//! Live parse paths are exercised through scripted transports; the offline
//! mock mode is exercised end-to-end through the whole pipeline.

use earnlens_tests::{
    align, symbol, AlphaVantageFeed, EdgarFeed, Feed, FeedEndpoint, FeedErrorKind,
    FixtureHttpClient, HistoryRequest, NextDisclosureRequest, PastDisclosuresRequest, PriceSeries,
    SummaryStats, VerifyRequest, YahooFeed, GOOG_DAILY_BODY,
};

#[tokio::test]
async fn when_the_daily_feed_answers_the_system_parses_the_documented_fields() {
    let client = FixtureHttpClient::with_bodies(&[GOOG_DAILY_BODY]);
    let feed = AlphaVantageFeed::with_http_client(client).with_api_key("test-key");
    let request = HistoryRequest::new(symbol("GOOG"), 100).expect("request");

    let history = feed.daily_history(request).await.expect("history");

    assert_eq!(history.len(), 4);
    let (first_date, first_quote) = &history.entries()[0];
    assert_eq!(first_date.to_string(), "2020-04-29");
    assert_eq!(first_quote.close, "1341.4800");

    // The parsed feed drives the series builder without adjustment.
    let series = PriceSeries::build(&history).expect("series");
    assert_eq!(series.points()[3].close, 1279.31);
}

#[tokio::test]
async fn when_a_known_ticker_is_probed_the_system_accepts_it() {
    let body = r#"{"bestMatches": [
        {"1. symbol": "MSFT", "2. name": "Microsoft Corporation", "3. type": "Equity"}
    ]}"#;
    let client = FixtureHttpClient::with_bodies(&[body]);
    let feed = AlphaVantageFeed::with_http_client(client).with_api_key("test-key");

    feed.verify(VerifyRequest::new(symbol("MSFT")))
        .await
        .expect("known ticker should be accepted");
}

#[tokio::test]
async fn when_an_unknown_ticker_is_probed_the_system_rejects_it() {
    let client = FixtureHttpClient::with_bodies(&[r#"{"bestMatches": []}"#]);
    let feed = AlphaVantageFeed::with_http_client(client).with_api_key("test-key");

    let error = feed
        .verify(VerifyRequest::new(symbol("ABCDEFG")))
        .await
        .expect_err("fake ticker must be rejected");
    assert_eq!(error.kind(), FeedErrorKind::NotFound);
}

#[tokio::test]
async fn when_the_daily_feed_throttles_the_system_reports_rate_limiting() {
    let body = r#"{"Note": "Our standard API rate limit is 25 requests per day."}"#;
    let client = FixtureHttpClient::with_bodies(&[body]);
    let feed = AlphaVantageFeed::with_http_client(client).with_api_key("test-key");
    let request = HistoryRequest::new(symbol("TSLA"), 100).expect("request");

    let error = feed.daily_history(request).await.expect_err("must fail");
    assert_eq!(error.kind(), FeedErrorKind::RateLimited);
}

#[tokio::test]
async fn when_the_upstream_rejects_the_call_the_system_reports_unavailability() {
    let client = FixtureHttpClient::with_status(503, "maintenance");
    let feed = AlphaVantageFeed::with_http_client(client).with_api_key("test-key");
    let request = HistoryRequest::new(symbol("GOOG"), 100).expect("request");

    let error = feed.daily_history(request).await.expect_err("must fail");
    assert_eq!(error.kind(), FeedErrorKind::Unavailable);
    assert!(error.retryable());
}

#[tokio::test]
async fn when_filings_exist_the_system_lists_their_dates_newest_first() {
    let index_body = r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}"#;
    let submissions_body = r#"{
        "filings": {"recent": {
            "form": ["8-K", "10-Q", "10-K", "10-Q"],
            "filingDate": ["2020-05-04", "2020-05-01", "2020-02-12", "2019-10-30"]
        }}
    }"#;
    let client = FixtureHttpClient::with_bodies(&[index_body, submissions_body]);
    let feed = EdgarFeed::with_http_client(client);
    let request = PastDisclosuresRequest::new(symbol("AAPL"), 10).expect("request");

    let disclosures = feed.past_disclosures(request).await.expect("disclosures");

    let rendered: Vec<String> = disclosures.iter().map(|d| d.to_string()).collect();
    assert_eq!(rendered, ["2020-05-01", "2020-02-12", "2019-10-30"]);
}

#[tokio::test]
async fn when_a_company_files_no_periodic_reports_the_system_reports_not_found() {
    let index_body = r#"{"0": {"cik_str": 1668717, "ticker": "BUD", "title": "Anheuser-Busch"}}"#;
    let submissions_body = r#"{
        "filings": {"recent": {
            "form": ["20-F", "6-K"],
            "filingDate": ["2020-03-24", "2020-02-27"]
        }}
    }"#;
    let client = FixtureHttpClient::with_bodies(&[index_body, submissions_body]);
    let feed = EdgarFeed::with_http_client(client);
    let request = PastDisclosuresRequest::new(symbol("BUD"), 10).expect("request");

    let error = feed.past_disclosures(request).await.expect_err("must fail");
    assert_eq!(error.kind(), FeedErrorKind::NotFound);
}

#[tokio::test]
async fn when_the_calendar_lists_a_date_the_system_returns_it() {
    let body = r#"{
        "quoteSummary": {
            "result": [{
                "calendarEvents": {
                    "earnings": {"earningsDate": [{"raw": 1588291200, "fmt": "2020-05-01"}]}
                }
            }],
            "error": null
        }
    }"#;
    let client = FixtureHttpClient::with_bodies(&[body]);
    let feed = YahooFeed::with_http_client(client);

    let next = feed
        .next_disclosure(NextDisclosureRequest::new(symbol("AAPL")))
        .await
        .expect("next date");
    assert_eq!(next.to_string(), "2020-05-01");
}

#[tokio::test]
async fn adapters_refuse_endpoints_outside_their_matrix() {
    let alphavantage = AlphaVantageFeed::default();
    let edgar = EdgarFeed::default();
    let yahoo = YahooFeed::default();

    let error = alphavantage
        .next_disclosure(NextDisclosureRequest::new(symbol("GOOG")))
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), FeedErrorKind::UnsupportedEndpoint);

    let error = edgar
        .verify(VerifyRequest::new(symbol("GOOG")))
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), FeedErrorKind::UnsupportedEndpoint);

    let error = yahoo
        .daily_history(HistoryRequest::new(symbol("GOOG"), 10).expect("request"))
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), FeedErrorKind::UnsupportedEndpoint);
}

#[tokio::test]
async fn capability_matrices_cover_every_pipeline_input_exactly_once() {
    let feeds: [&dyn Feed; 3] = [
        &AlphaVantageFeed::default(),
        &EdgarFeed::default(),
        &YahooFeed::default(),
    ];

    for endpoint in [
        FeedEndpoint::History,
        FeedEndpoint::PastDisclosures,
        FeedEndpoint::NextDisclosure,
    ] {
        let servers = feeds
            .iter()
            .filter(|feed| feed.capabilities().supports(endpoint))
            .count();
        assert_eq!(servers, 1, "exactly one source must serve {endpoint}");
    }

    let edgar_endpoints = EdgarFeed::default().capabilities().supported_endpoints();
    assert_eq!(edgar_endpoints, ["past_disclosures"]);
}

#[tokio::test]
async fn the_offline_fixtures_drive_the_whole_pipeline() {
    let alphavantage = AlphaVantageFeed::default();
    let edgar = EdgarFeed::default();
    let yahoo = YahooFeed::default();
    let ticker = symbol("GOOG");

    alphavantage
        .verify(VerifyRequest::new(ticker.clone()))
        .await
        .expect("mock verify");
    let history = alphavantage
        .daily_history(HistoryRequest::new(ticker.clone(), 1_500).expect("request"))
        .await
        .expect("mock history");
    let past = edgar
        .past_disclosures(PastDisclosuresRequest::new(ticker.clone(), 12).expect("request"))
        .await
        .expect("mock disclosures");
    let next = yahoo
        .next_disclosure(NextDisclosureRequest::new(ticker))
        .await
        .expect("mock next date");

    let series = PriceSeries::build(&history).expect("series");
    let table = align(&past, &series, next).expect("aligned");
    let stats = SummaryStats::from_table(&table).expect("stats");

    assert_eq!(table.rows().len(), past.len() + 1);
    assert!(table.rows()[0].is_upcoming());
    assert!(stats.mean.is_finite());
    assert!(stats.min <= stats.max);
}
