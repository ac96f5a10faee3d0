//! Freemium overlay drawn over the locked end of the chart.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::chart::{EXPECTED_SAMPLE_COUNT, FREE_SAMPLE_CAP};
use crate::tui::app::App;

/// Text describing how many samples the gate holds back.
///
/// Payloads no longer than the free cap hide nothing, which is said
/// outright rather than as "0 data points".
pub fn locked_message(locked: usize) -> String {
    match locked {
        0 => "Every data point in this set is free.".to_string(),
        1 => "The latest data point is locked.".to_string(),
        n => format!("The latest {n} data points are locked."),
    }
}

/// Renders the lock panel over the right third of `chart_area`.
pub fn render(frame: &mut Frame, chart_area: Rect, app: &App) {
    let width = (chart_area.width / 3).max(24).min(chart_area.width);
    let area = Rect {
        x: chart_area.x + chart_area.width - width,
        width,
        ..chart_area
    };

    // Before the data arrives the locked count is the nominal one.
    let locked = if app.view.samples().is_empty() {
        EXPECTED_SAMPLE_COUNT - FREE_SAMPLE_CAP
    } else {
        app.view.locked_len()
    };

    let block = Block::default()
        .title(" Premium Data ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "🔒",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(locked_message(locked)),
        Line::from(Span::styled(
            "Upgrade to unlock real-time insights.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " [s] Subscribe to Unlock ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "mock payment, no charge",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
