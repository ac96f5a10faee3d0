mod common;

use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ribbon::chart::{Phase, Subscription};
use ribbon::feed::SyntheticFeed;
use ribbon::tui::event::update;
use ribbon::tui::ui::chart_area;
use ribbon::tui::{App, Message, render};
use tokio::sync::mpsc;

use common::market_data;

const WIDTH: u16 = 200;
const HEIGHT: u16 = 40;

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn draw(terminal: &mut Terminal<TestBackend>, app: &App) -> String {
    terminal.draw(|frame| render(frame, app)).unwrap();
    screen(terminal)
}

/// An app with a mounted surface and the fixture already delivered.
async fn loaded_app() -> App {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(WIDTH, HEIGHT, "fixture");
    app.mount(Arc::new(SyntheticFeed::default()), tx);
    if let Some(task) = app.fetch_task.take() {
        task.abort();
    }
    update(&mut app, Message::DataLoaded(Ok(market_data())));
    app
}

#[tokio::test]
async fn shows_spinner_and_overlay_while_loading() {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let app = App::new(WIDTH, HEIGHT, "fixture");

    let text = draw(&mut terminal, &app);

    assert!(text.contains("Loading Trading Chart..."));
    assert!(text.contains("Premium Data"));
    assert!(text.contains("The latest 20 data points are locked."));
    assert!(text.contains("Waiting for data"));
}

#[tokio::test]
async fn free_chart_keeps_overlay() {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let app = loaded_app().await;
    assert_eq!(app.view.phase(), Phase::Ready);

    let text = draw(&mut terminal, &app);

    assert!(!text.contains("Loading Trading Chart..."));
    assert!(text.contains("Premium Data"));
    assert!(text.contains("$1014.97"));
    assert!(text.contains("+1.57%"));
    assert!(text.contains("80/100"));
    assert!(text.contains("[s]imulate payment"));
}

#[tokio::test]
async fn payment_removes_overlay_and_shows_everything() {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let mut app = loaded_app().await;

    assert!(app.simulate_payment());
    assert_eq!(app.view.subscription(), Subscription::Subscribed);

    let text = draw(&mut terminal, &app);

    assert!(!text.contains("Premium Data"));
    assert!(text.contains("Premium Active"));
    assert!(text.contains("100/100"));
    assert!(text.contains("$1029.12"));
    assert_eq!(app.surface().unwrap().points("Price").unwrap().len(), 100);
}

#[tokio::test]
async fn mount_delivers_synthetic_data() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(WIDTH, HEIGHT, "synthetic");
    app.mount(
        Arc::new(SyntheticFeed {
            seed: Some(1),
            ..SyntheticFeed::default()
        }),
        tx,
    );
    assert!(app.host.as_ref().is_some_and(|h| h.is_mounted()));
    assert_eq!(app.viewport.listener_count(), 1);

    let message = rx.recv().await.unwrap();
    update(&mut app, message);
    assert_eq!(app.view.phase(), Phase::Ready);
    assert_eq!(app.view.visible_len(), 80);

    app.unmount();
    assert!(app.host.is_none());
    assert_eq!(app.viewport.listener_count(), 0);
}

#[tokio::test]
async fn surface_tracks_the_chart_panel_width() {
    let mut app = loaded_app().await;
    let panel = chart_area(WIDTH, HEIGHT);
    assert_eq!(app.surface().unwrap().width(), panel.width);
    assert!(panel.width < WIDTH);

    app.resize(160, 30);

    let panel = chart_area(160, 30);
    assert_eq!(app.viewport.size().width, panel.width);
    assert_eq!(app.surface().unwrap().width(), panel.width);

    // The panel is exactly the area the surface is drawn into.
    let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
    draw(&mut terminal, &app);
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(panel.x - 1, panel.y - 1)].symbol(), "┌");
    assert_eq!(buffer[(panel.x + panel.width, panel.y - 1)].symbol(), "┐");
}

#[tokio::test]
async fn sidebar_shows_static_stats_and_signals() {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let app = loaded_app().await;

    let text = draw(&mut terminal, &app);

    assert!(text.contains("Volume"));
    assert!(text.contains("1.2M"));
    assert!(text.contains("Market Cap"));
    assert!(text.contains("$847B"));
    assert!(text.contains("Trading Signals"));
    assert!(text.contains("BUY Signal"));
    assert!(text.contains("HOLD Signal"));
}

#[tokio::test]
async fn short_payload_overlay_says_nothing_is_locked() {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(WIDTH, HEIGHT, "fixture");
    app.mount(Arc::new(SyntheticFeed::default()), tx);
    if let Some(task) = app.fetch_task.take() {
        task.abort();
    }
    let mut samples = market_data();
    samples.truncate(50);
    update(&mut app, Message::DataLoaded(Ok(samples)));

    let text = draw(&mut terminal, &app);

    assert!(text.contains("Premium Data"));
    assert!(text.contains("Every data point in this set is free."));
    assert!(!text.contains("0 data points are locked"));
    assert!(text.contains("50/50"));
}
