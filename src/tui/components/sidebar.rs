//! Sidebar with market stats and subscription status.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rust_decimal::Decimal;

use crate::chart::Subscription;
use crate::tui::app::App;

/// Renders the sidebar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Min(6),
        ])
        .split(area);

    render_market_stats(frame, layout[0], app);
    render_signals(frame, layout[1]);
    render_subscription(frame, layout[2], app);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<11}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_market_stats(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Market Stats ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match app.view.summary() {
        Some(summary) => {
            let price = summary.current_price;
            vec![
                stat_line("24h High", format!("${:.2}", price * Decimal::new(105, 2))),
                stat_line("24h Low", format!("${:.2}", price * Decimal::new(95, 2))),
                stat_line("Volume", "1.2M".to_string()),
                stat_line("Market Cap", "$847B".to_string()),
                stat_line(
                    "Visible",
                    format!("{}/{}", app.view.visible_len(), app.view.samples().len()),
                ),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Waiting for data",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Static signal cards; they are not derived from the data.
fn render_signals(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Trading Signals ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let signal = |label: &'static str, detail: &'static str, color: Color| {
        [
            Line::from(vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(
                format!("  {detail}"),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };

    let lines: Vec<Line> = signal("BUY Signal", "SMA Crossover", Color::Green)
        .into_iter()
        .chain(signal("HOLD Signal", "Price Consolidation", Color::Yellow))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_subscription(frame: &mut Frame, area: Rect, app: &App) {
    let (title, color, lines) = match app.view.subscription() {
        Subscription::Free => (
            " 🔒 Premium Features ",
            Color::Yellow,
            vec![
                Line::from("Unlock the latest data points and get real-time market insights."),
                Line::from(""),
                Line::from(Span::styled(
                    "[s] Simulate Payment",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ],
        ),
        Subscription::Subscribed => (
            " ✅ Premium Active ",
            Color::Green,
            vec![
                Line::from(format!(
                    "You now have access to all {} data points.",
                    app.view.samples().len()
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "● Live Data Active",
                    Style::default().fg(Color::Green),
                )),
            ],
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
