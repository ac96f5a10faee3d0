//! Main event loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use super::app::App;
use super::event::{Message, spawn_event_reader, spawn_tick_timer, update};
use super::terminal::Tui;
use super::ui::render;
use crate::feed::MarketDataSource;
use crate::{Result, RibbonError};

/// Runs the chart screen until the user quits.
///
/// Mounts the chart, starts the one market-data fetch, then redraws after
/// every batch of messages. The chart is unmounted before returning, which
/// cancels a fetch that is still in flight.
///
/// # Errors
///
/// Returns [`RibbonError::Io`] if the terminal cannot be queried or drawn.
pub async fn run<F: MarketDataSource>(terminal: &mut Tui, feed: Arc<F>, tick_ms: u64) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), tick_ms);

    let size = terminal
        .size()
        .map_err(|e| RibbonError::Io(format!("failed to read terminal size: {e}")))?;
    let mut app = App::new(size.width, size.height, feed.label());
    app.mount(feed, tx);
    info!(width = size.width, height = size.height, "Chart screen started");

    let result = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, &app)) {
            break Err(RibbonError::Io(format!("failed to draw: {e}")));
        }

        let Some(message) = rx.recv().await else {
            break Ok(());
        };
        update(&mut app, message);
        while let Ok(message) = rx.try_recv() {
            update(&mut app, message);
        }

        if app.should_quit {
            break Ok(());
        }
    };

    app.unmount();
    info!("Chart screen closed");
    result
}
