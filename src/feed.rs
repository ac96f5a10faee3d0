//! Market-data sources.
//!
//! [`HttpFeed`] issues a single unauthenticated `GET` against the
//! market-data endpoint; [`SyntheticFeed`] produces the same payload
//! in-process. Both sit behind [`MarketDataSource`] so the chart view does
//! not care where samples come from.

use std::future::Future;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::Result;
use crate::config::FeedConfig;
use crate::models::{Sample, parse_samples};
use crate::synthetic::{generate_market_data, now_secs};

/// Anything that can produce the full sample sequence.
pub trait MarketDataSource: Send + Sync + 'static {
    /// Fetches the full, validated sample sequence.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Sample>>> + Send;

    /// Short description for the header line.
    fn label(&self) -> String;
}

/// Fetches samples from the HTTP market-data endpoint.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    /// Creates a feed for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::Http`](crate::RibbonError::Http) if the HTTP
    /// client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MarketDataSource for HttpFeed {
    async fn fetch(&self) -> Result<Vec<Sample>> {
        debug!(url = %self.url, "Requesting market data");
        let response = self.client.get(&self.url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let samples = parse_samples(&body)?;
        info!(count = samples.len(), "Fetched market data");
        Ok(samples)
    }

    fn label(&self) -> String {
        self.url.clone()
    }
}

/// Generates samples locally instead of calling the backend.
#[derive(Debug, Clone)]
pub struct SyntheticFeed {
    pub steps: usize,
    pub start_price: f64,
    /// Fixed seed for a reproducible walk; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self {
            steps: crate::chart::EXPECTED_SAMPLE_COUNT,
            start_price: 1000.0,
            seed: None,
        }
    }
}

impl MarketDataSource for SyntheticFeed {
    async fn fetch(&self) -> Result<Vec<Sample>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let samples = generate_market_data(self.steps, self.start_price, now_secs(), &mut rng);
        info!(count = samples.len(), "Generated synthetic market data");
        Ok(samples)
    }

    fn label(&self) -> String {
        "synthetic".to_string()
    }
}

/// Feed selected by configuration.
#[derive(Debug, Clone)]
pub enum Feed {
    Http(HttpFeed),
    Synthetic(SyntheticFeed),
}

impl Feed {
    /// Builds the feed described by `config`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpFeed::new`] failures.
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        if config.demo {
            Ok(Feed::Synthetic(SyntheticFeed::default()))
        } else {
            Ok(Feed::Http(HttpFeed::new(config.api_url.clone())?))
        }
    }
}

impl MarketDataSource for Feed {
    async fn fetch(&self) -> Result<Vec<Sample>> {
        match self {
            Feed::Http(feed) => feed.fetch().await,
            Feed::Synthetic(feed) => feed.fetch().await,
        }
    }

    fn label(&self) -> String {
        match self {
            Feed::Http(feed) => feed.label(),
            Feed::Synthetic(feed) => feed.label(),
        }
    }
}
