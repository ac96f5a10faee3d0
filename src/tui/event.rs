//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;
use tracing::debug;

use super::app::App;
use crate::Result;
use crate::models::Sample;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// The market-data fetch finished.
    DataLoaded(Result<Vec<Sample>>),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::DataLoaded(result) => app.on_data_loaded(result),
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(width, height) => app.resize(width, height),
        Event::Tick => app.tick(),
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) {
    // Some platforms report releases too.
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('s') | KeyCode::Enter => {
            if !app.simulate_payment() {
                debug!("Already subscribed");
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Subscription;
    use crate::tui::ui::chart_area;

    fn key(code: KeyCode) -> Message {
        Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn quit_keys_set_flag() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = App::new(80, 24, "test");
            update(&mut app, key(code));
            assert!(app.should_quit);
        }

        let mut app = App::new(80, 24, "test");
        update(
            &mut app,
            Message::Input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn s_key_subscribes() {
        let mut app = App::new(80, 24, "test");
        update(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.view.subscription(), Subscription::Subscribed);
        update(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.view.subscription(), Subscription::Subscribed);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut app = App::new(80, 24, "test");
        update(&mut app, Message::Input(Event::Resize(132, 40)));
        let panel = chart_area(132, 40);
        assert_eq!(app.viewport.size().width, panel.width);
        assert!(panel.width < 132);
    }

    #[test]
    fn tick_advances_spinner() {
        let mut app = App::new(80, 24, "test");
        update(&mut app, Message::Input(Event::Tick));
        update(&mut app, Message::Input(Event::Tick));
        assert_eq!(app.spinner, 2);
    }
}
