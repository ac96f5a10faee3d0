mod common;

use std::sync::Arc;

use ribbon::RibbonError;
use ribbon::chart::{ChartView, Phase};
use ribbon::config::FeedConfig;
use ribbon::feed::{Feed, HttpFeed, MarketDataSource, SyntheticFeed};
use ribbon::models::{BEARISH_COLOR, BULLISH_COLOR};
use rust_decimal_macros::dec;
use tokio::sync::mpsc;

use common::{MALFORMED_JSON, MARKET_DATA_JSON, RecordingSurface, serve_once};

#[tokio::test]
async fn http_feed_parses_market_data() {
    let url = serve_once("200 OK", MARKET_DATA_JSON).await;
    let feed = HttpFeed::new(url).unwrap();

    let samples = feed.fetch().await.unwrap();

    assert_eq!(samples.len(), 100);
    assert_eq!(samples[0].price, dec!(999.28));
    assert!(samples[0].sma_5.is_none());
    assert!(samples[3].sma_5.is_none());
    assert!(samples[4].sma_5.is_some());
    assert!(samples[8].ribbon_color.is_none());
    assert!(samples[9].sma_10.is_some());
    assert!(samples[9..].iter().all(|s| {
        matches!(s.ribbon_color.as_deref(), Some(BULLISH_COLOR | BEARISH_COLOR))
    }));
    assert_eq!(samples[99].price, dec!(1029.12));
}

#[tokio::test]
async fn http_feed_rejects_error_status() {
    let url = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let feed = HttpFeed::new(url).unwrap();

    let err = feed.fetch().await.unwrap_err();
    assert!(matches!(err, RibbonError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn http_feed_rejects_non_array_body() {
    let url = serve_once("200 OK", r#"{"data": []}"#).await;
    let feed = HttpFeed::new(url).unwrap();

    let err = feed.fetch().await.unwrap_err();
    assert!(matches!(err, RibbonError::MalformedPayload(_)), "got {err:?}");
}

#[tokio::test]
async fn http_feed_names_the_bad_sample() {
    let url = serve_once("200 OK", MALFORMED_JSON).await;
    let feed = HttpFeed::new(url).unwrap();

    let err = feed.fetch().await.unwrap_err();
    assert!(
        matches!(err, RibbonError::MalformedSample { index: 1, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_an_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let feed = HttpFeed::new(format!("http://{addr}/api/market-data")).unwrap();
    let err = feed.fetch().await.unwrap_err();
    assert!(matches!(err, RibbonError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_leaves_chart_loading() {
    let url = serve_once("500 Internal Server Error", "").await;
    let feed = Arc::new(HttpFeed::new(url).unwrap());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut view = ChartView::new();
    let task = view
        .on_surface_ready(feed, move |result| {
            let _ = tx.send(result);
        })
        .unwrap();
    task.await.unwrap();

    let mut surface = RecordingSurface::new();
    view.apply_fetch(rx.recv().await.unwrap(), &mut surface);

    assert_eq!(view.phase(), Phase::Loading);
    assert!(surface.ops.is_empty());
}

#[tokio::test]
async fn synthetic_feed_is_reproducible_with_a_seed() {
    let feed = SyntheticFeed {
        seed: Some(7),
        ..SyntheticFeed::default()
    };

    let first = feed.fetch().await.unwrap();
    let second = feed.fetch().await.unwrap();

    assert_eq!(first.len(), 100);
    let prices = |samples: &[ribbon::models::Sample]| {
        samples.iter().map(|s| s.price).collect::<Vec<_>>()
    };
    assert_eq!(prices(&first), prices(&second));
}

#[test]
fn demo_config_selects_synthetic_feed() {
    let config = FeedConfig {
        api_url: "http://localhost:8000/api/market-data".to_string(),
        demo: true,
    };
    let feed = Feed::from_config(&config).unwrap();
    assert!(matches!(feed, Feed::Synthetic(_)));
    assert_eq!(feed.label(), "synthetic");

    let config = FeedConfig {
        demo: false,
        ..config
    };
    let feed = Feed::from_config(&config).unwrap();
    match feed {
        Feed::Http(http) => assert_eq!(http.url(), "http://localhost:8000/api/market-data"),
        other => panic!("expected an HTTP feed, got {other:?}"),
    }
}
