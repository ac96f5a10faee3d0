//! Application state for the TUI.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use super::event::Message;
use super::ui::chart_area;
use crate::Result;
use crate::chart::{ChartHost, ChartView, TerminalSurface, Viewport};
use crate::feed::MarketDataSource;
use crate::models::Sample;

/// Central application state container.
pub struct App {
    /// Chart panel the surface is mounted on, sized from the terminal.
    pub viewport: Viewport,
    /// Owner of the chart surface; `None` until mounted and after unmount.
    pub host: Option<ChartHost<TerminalSurface>>,
    /// Data-bound chart view.
    pub view: ChartView,
    /// Where market data comes from, for the header.
    pub feed_label: String,
    /// Loading spinner frame counter.
    pub spinner: usize,
    /// The single market-data fetch of this mount.
    pub fetch_task: Option<JoinHandle<()>>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an unmounted app for a terminal of the given size.
    pub fn new(width: u16, height: u16, feed_label: impl Into<String>) -> Self {
        let panel = chart_area(width, height);
        Self {
            viewport: Viewport::new(panel.width, panel.height),
            host: None,
            view: ChartView::new(),
            feed_label: feed_label.into(),
            spinner: 0,
            fetch_task: None,
            should_quit: false,
        }
    }

    /// Mounts the chart on the viewport and starts the market-data fetch.
    ///
    /// The fetch result comes back on `tx` as [`Message::DataLoaded`].
    pub fn mount<F: MarketDataSource>(&mut self, feed: Arc<F>, tx: mpsc::UnboundedSender<Message>) {
        let view = &mut self.view;
        let fetch_task = &mut self.fetch_task;
        let host = ChartHost::mount(
            Some(&self.viewport),
            |options| Ok(TerminalSurface::new(options)),
            |_surface| {
                *fetch_task = view.on_surface_ready(feed, move |result| {
                    // The receiver is gone only when the app is shutting down.
                    let _ = tx.send(Message::DataLoaded(result));
                });
            },
        );
        self.host = Some(host);
    }

    /// Tears down the view scope and the chart surface.
    pub fn unmount(&mut self) {
        self.view.unmount();
        if let Some(mut host) = self.host.take() {
            host.unmount();
        }
    }

    /// Routes a finished fetch into the view.
    pub fn on_data_loaded(&mut self, result: Result<Vec<Sample>>) {
        match self.host.as_mut().and_then(|h| h.surface_mut()) {
            Some(surface) => self.view.apply_fetch(result, surface),
            None => warn!("Market data arrived without a chart surface"),
        }
    }

    /// Mock payment: unlocks the full sample sequence.
    pub fn simulate_payment(&mut self) -> bool {
        let surface = self.host.as_mut().and_then(|h| h.surface_mut());
        self.view.toggle_subscription(surface)
    }

    /// Publishes the chart panel size for a terminal resize and keeps the
    /// surface width in sync.
    pub fn resize(&mut self, width: u16, height: u16) {
        let panel = chart_area(width, height);
        self.viewport.resize(panel.width, panel.height);
        if let Some(host) = self.host.as_mut() {
            host.sync_size();
        }
    }

    /// Advances the loading spinner.
    pub fn tick(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
    }

    pub fn surface(&self) -> Option<&TerminalSurface> {
        self.host.as_ref().and_then(|h| h.surface())
    }
}
