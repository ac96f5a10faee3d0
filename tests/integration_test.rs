//! Tests against a running market-data backend.
//!
//! These tests require the backend to be serving on `RIBBON_API_URL`
//! (default `http://localhost:8000/api/market-data`).
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use ribbon::chart::{ChartView, EXPECTED_SAMPLE_COUNT, Phase};
use ribbon::config::fetch_config;
use ribbon::feed::{HttpFeed, MarketDataSource};
use ribbon::models::{BEARISH_COLOR, BULLISH_COLOR};

mod common;

fn live_feed() -> HttpFeed {
    let config = fetch_config().expect("failed to load config");
    HttpFeed::new(config.feed.api_url).expect("failed to build HTTP feed")
}

#[tokio::test]
async fn test_fetch_live_market_data() {
    let samples = live_feed()
        .fetch()
        .await
        .expect("Failed to fetch market data");

    assert_eq!(samples.len(), EXPECTED_SAMPLE_COUNT);
    assert!(samples[..4].iter().all(|s| s.sma_5.is_none()));
    assert!(samples[..9].iter().all(|s| s.sma_10.is_none()));
    for sample in &samples[9..] {
        let color = sample.ribbon_color.as_deref();
        assert!(
            matches!(color, Some(BULLISH_COLOR | BEARISH_COLOR)),
            "unexpected ribbon color {color:?}"
        );
    }
}

#[tokio::test]
async fn test_live_data_renders() {
    let samples = live_feed().fetch().await;

    let mut view = ChartView::new();
    let mut surface = common::RecordingSurface::new();
    view.apply_fetch(samples, &mut surface);

    assert_eq!(view.phase(), Phase::Ready);
    assert_eq!(surface.inner.points("Price").map(|p| p.len()), Some(80));
}
