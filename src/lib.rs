//! Terminal price chart with a moving-average ribbon and a freemium gate.
//!
//! Fetches a price series with pre-computed SMA 5 / SMA 10 and ribbon
//! colors, renders it with ratatui, and hides the most recent samples until
//! a mock payment unlocks them.

pub mod chart;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod synthetic;
pub mod tui;

pub use error::{Result, RibbonError};
