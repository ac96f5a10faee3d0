//! Data-bound chart view with the freemium gate.
//!
//! The view fetches the full sample sequence once per mount, then derives
//! everything it draws from a prefix of that sequence:
//!
//! - free users see the first [`FREE_SAMPLE_CAP`] samples,
//! - subscribed users see all of them.
//!
//! Every render rebuilds the three series and the ribbon markers from
//! scratch. Series created by the previous render are tracked and removed
//! from the surface first, so the surface never accumulates stale series.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::surface::{
    Marker, MarkerPosition, MarkerShape, Point, SeriesId, SeriesKind, SeriesStyle, Surface,
};
use crate::Result;
use crate::feed::MarketDataSource;
use crate::models::Sample;

/// Samples visible without a subscription.
pub const FREE_SAMPLE_CAP: usize = 80;

/// Samples the endpoint is expected to return.
pub const EXPECTED_SAMPLE_COUNT: usize = 100;

pub const PRICE_COLOR: &str = "#00D4FF";
pub const SMA_5_COLOR: &str = "#FF6B35";
pub const SMA_10_COLOR: &str = "#7C3AED";

/// Marker color for bullish samples.
pub const POSITIVE_MARKER_COLOR: &str = "#10B98150";

/// Marker color for every other colored sample.
pub const NEGATIVE_MARKER_COLOR: &str = "#EF444450";

/// Subscription state. Only ever moves from `Free` to `Subscribed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Subscription {
    #[default]
    Free,
    Subscribed,
}

impl Subscription {
    /// Number of samples visible out of `total`.
    pub fn visible_len(self, total: usize) -> usize {
        match self {
            Subscription::Free => total.min(FREE_SAMPLE_CAP),
            Subscription::Subscribed => total,
        }
    }
}

/// Whether the view has rendered data yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}

/// Headline numbers derived from the display subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Price of the last visible sample.
    pub current_price: Decimal,
    /// `(last - first) / first * 100`; absent when the first price is zero.
    pub price_change_pct: Option<Decimal>,
}

/// Returns the prefix of `samples` visible under `subscription`.
pub fn display_subset(samples: &[Sample], subscription: Subscription) -> &[Sample] {
    &samples[..subscription.visible_len(samples.len())]
}

/// Price points, one per sample.
pub fn price_points(subset: &[Sample]) -> Vec<Point> {
    field_points(subset, |s| Some(s.price))
}

/// Points for an optional field; samples without a value are skipped.
pub fn field_points(subset: &[Sample], field: impl Fn(&Sample) -> Option<Decimal>) -> Vec<Point> {
    subset
        .iter()
        .enumerate()
        .filter_map(|(time, sample)| {
            let value = field(sample)?.to_f64()?;
            Some(Point { time, value })
        })
        .collect()
}

/// One square marker per sample with a ribbon color.
pub fn ribbon_markers(subset: &[Sample]) -> Vec<Marker> {
    subset
        .iter()
        .enumerate()
        .filter(|(_, sample)| sample.ribbon_color.is_some())
        .map(|(time, sample)| Marker {
            time,
            position: MarkerPosition::InBar,
            shape: MarkerShape::Square,
            color: if sample.is_bullish() {
                POSITIVE_MARKER_COLOR
            } else {
                NEGATIVE_MARKER_COLOR
            }
            .to_string(),
        })
        .collect()
}

/// Current price and change over the subset, `None` when it is empty.
pub fn summarize(subset: &[Sample]) -> Option<Summary> {
    let first = subset.first()?.price;
    let last = subset.last()?.price;
    let price_change_pct = (last - first)
        .checked_div(first)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    Some(Summary {
        current_price: last,
        price_change_pct,
    })
}

/// Cancellation scope tied to one mount of the view.
///
/// Work spawned with a [`ScopeToken`] stops as soon as the scope is
/// cancelled or dropped.
#[derive(Debug)]
pub struct MountScope {
    cancelled: watch::Sender<bool>,
}

impl MountScope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: watch::Sender::new(false),
        }
    }

    pub fn token(&self) -> ScopeToken {
        ScopeToken(self.cancelled.subscribe())
    }

    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }
}

impl Default for MountScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`MountScope`].
#[derive(Debug, Clone)]
pub struct ScopeToken(watch::Receiver<bool>);

impl ScopeToken {
    /// Resolves once the scope is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        // An Err means the scope is gone, which counts as cancelled.
        let _ = self.0.wait_for(|cancelled| *cancelled).await;
    }
}

/// Chart view state.
#[derive(Debug, Default)]
pub struct ChartView {
    subscription: Subscription,
    phase: Phase,
    samples: Vec<Sample>,
    active_series: Vec<SeriesId>,
    summary: Option<Summary>,
    fetch_started: bool,
    scope: MountScope,
}

impl ChartView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the one fetch of this mount.
    ///
    /// The fetch runs on a spawned task bound to the mount scope; its
    /// result is handed to `deliver`, which is expected to route it back to
    /// [`ChartView::apply_fetch`]. Returns `None` if a fetch was already
    /// started or the view is unmounted.
    pub fn on_surface_ready<F, D>(&mut self, feed: Arc<F>, deliver: D) -> Option<JoinHandle<()>>
    where
        F: MarketDataSource,
        D: FnOnce(Result<Vec<Sample>>) + Send + 'static,
    {
        if self.scope.is_cancelled() {
            debug!("Surface ready after unmount, not fetching");
            return None;
        }
        if self.fetch_started {
            warn!("Surface signalled ready twice, ignoring");
            return None;
        }
        self.fetch_started = true;

        let mut token = self.scope.token();
        Some(tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    debug!("Market data fetch abandoned, view unmounted");
                }
                result = feed.fetch() => deliver(result),
            }
        }))
    }

    /// Handles the fetch result.
    ///
    /// On success caches the samples and renders. On failure logs and stays
    /// in [`Phase::Loading`]. Results that arrive after unmount are dropped.
    pub fn apply_fetch<S: Surface>(&mut self, result: Result<Vec<Sample>>, surface: &mut S) {
        if self.scope.is_cancelled() {
            debug!("Dropping market data that arrived after unmount");
            return;
        }
        match result {
            Ok(samples) => {
                if samples.len() != EXPECTED_SAMPLE_COUNT {
                    debug!(
                        count = samples.len(),
                        expected = EXPECTED_SAMPLE_COUNT,
                        "Unexpected sample count"
                    );
                }
                self.samples = samples;
                self.render(surface);
                self.phase = Phase::Ready;
            }
            Err(e) => {
                error!("Error fetching market data: {e}");
            }
        }
    }

    /// Rebuilds every series and marker for the current subscription.
    pub fn render<S: Surface>(&mut self, surface: &mut S) {
        for id in self.active_series.drain(..) {
            surface.remove_series(id);
        }

        let subset = display_subset(&self.samples, self.subscription);

        let price = surface.add_series(
            SeriesKind::Line,
            SeriesStyle::new("Price", PRICE_COLOR, 3),
        );
        let sma_5 = surface.add_series(
            SeriesKind::Line,
            SeriesStyle::new("SMA 5", SMA_5_COLOR, 2),
        );
        let sma_10 = surface.add_series(
            SeriesKind::Line,
            SeriesStyle::new("SMA 10", SMA_10_COLOR, 2),
        );

        surface.set_data(price, price_points(subset));
        surface.set_data(sma_5, field_points(subset, |s| s.sma_5));
        surface.set_data(sma_10, field_points(subset, |s| s.sma_10));

        let markers = ribbon_markers(subset);
        if !markers.is_empty() {
            surface.set_markers(price, markers);
        }

        surface.fit_content();
        self.summary = summarize(subset);
        self.active_series = vec![price, sma_5, sma_10];

        debug!(
            visible = subset.len(),
            total = self.samples.len(),
            subscription = ?self.subscription,
            "Chart rendered"
        );
    }

    /// Simulated payment: moves to [`Subscription::Subscribed`] once.
    ///
    /// Re-renders from the cached samples when there are any; never
    /// re-fetches. Returns `false` if already subscribed.
    pub fn toggle_subscription<S: Surface>(&mut self, surface: Option<&mut S>) -> bool {
        if self.subscription == Subscription::Subscribed {
            return false;
        }
        self.subscription = Subscription::Subscribed;
        info!("Subscription activated");

        if let Some(surface) = surface
            && !self.samples.is_empty()
            && !self.scope.is_cancelled()
        {
            self.render(surface);
        }
        true
    }

    /// Cancels the mount scope; in-flight and late fetch results are ignored.
    pub fn unmount(&mut self) {
        self.scope.cancel();
        self.active_series.clear();
    }

    pub fn subscription(&self) -> Subscription {
        self.subscription
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn summary(&self) -> Option<Summary> {
        self.summary
    }

    /// The cached full sequence.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples currently drawn.
    pub fn visible_len(&self) -> usize {
        self.subscription.visible_len(self.samples.len())
    }

    /// Samples held back by the freemium gate.
    pub fn locked_len(&self) -> usize {
        self.samples.len() - self.visible_len()
    }

    pub fn active_series(&self) -> &[SeriesId] {
        &self.active_series
    }
}
