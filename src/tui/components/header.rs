//! Header with the feed name, current price and change.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

/// Renders the header.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = vec![
        Span::styled(
            " Ribbon ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.feed_label.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let price_spans = match app.view.summary() {
        Some(summary) => {
            let change = summary.price_change_pct.unwrap_or(Decimal::ZERO);
            let change_color = if change >= Decimal::ZERO {
                Color::Green
            } else {
                Color::Red
            };
            vec![
                Span::styled(
                    format!("${:.2} ", summary.current_price),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{change:+.2}% "),
                    Style::default().fg(change_color),
                ),
            ]
        }
        None => vec![Span::styled(" -- ", Style::default().fg(Color::DarkGray))],
    };

    // Right-align the price block on the same line as the title.
    let used: usize = title
        .iter()
        .chain(price_spans.iter())
        .map(|s| s.content.width())
        .sum();
    let padding = (inner.width as usize).saturating_sub(used);

    let mut spans = title;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(price_spans);

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
