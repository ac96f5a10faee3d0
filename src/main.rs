use std::sync::Arc;

use ribbon::RibbonError;
use ribbon::config::fetch_config;
use ribbon::feed::Feed;
use ribbon::tui::{restore_terminal, run, setup_terminal};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), RibbonError> {
    let app_config = fetch_config()?;

    // Tracing goes to a file; the terminal belongs to the chart.
    ribbon::logging::init(&app_config.log_file)?;
    info!(
        api_url = %app_config.feed.api_url,
        demo = app_config.feed.demo,
        "Starting ribbon"
    );

    let feed = Arc::new(Feed::from_config(&app_config.feed)?);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, feed, app_config.tick_ms).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        error!("Chart screen failed: {e}");
    }
    result
}
