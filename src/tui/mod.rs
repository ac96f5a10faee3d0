//! Terminal User Interface for the price chart.
//!
//! Provides a Ratatui-based screen with the chart, the freemium overlay
//! and a sidebar of market stats.

pub mod app;
pub mod components;
pub mod event;
pub mod runner;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message};
pub use runner::run;
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
