//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use super::components::{header, overlay, sidebar};
use crate::chart::view::{PRICE_COLOR, SMA_5_COLOR, SMA_10_COLOR};
use crate::chart::{Phase, Subscription, surface::hex_color};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Screen regions, in terminal cells.
struct Regions {
    header: Rect,
    chart: Rect,
    sidebar: Rect,
    help: Rect,
}

fn regions(area: Rect) -> Regions {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Chart + sidebar
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(main_layout[1]);

    Regions {
        header: main_layout[0],
        chart: body[0],
        sidebar: body[1],
        help: main_layout[2],
    }
}

/// Area inside the chart panel border for a terminal of the given size.
///
/// This is the container the chart surface is mounted on.
pub fn chart_area(width: u16, height: u16) -> Rect {
    Block::default()
        .borders(Borders::ALL)
        .inner(regions(Rect::new(0, 0, width, height)).chart)
}

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let regions = regions(frame.area());

    header::render(frame, regions.header, app);
    render_chart_panel(frame, regions.chart, app);
    sidebar::render(frame, regions.sidebar, app);
    render_keybindings(frame, regions.help, app);
}

/// Renders the chart panel: legend, surface or spinner, and the lock overlay.
fn render_chart_panel(frame: &mut Frame, area: Rect, app: &App) {
    let legend = Line::from(vec![
        Span::raw(" Price Chart  "),
        Span::styled("● ", Style::default().fg(hex_color(PRICE_COLOR))),
        Span::raw("Price  "),
        Span::styled("● ", Style::default().fg(hex_color(SMA_5_COLOR))),
        Span::raw("SMA 5  "),
        Span::styled("● ", Style::default().fg(hex_color(SMA_10_COLOR))),
        Span::raw("SMA 10 "),
    ]);
    let block = Block::default()
        .title(legend)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match (app.view.phase(), app.surface()) {
        (Phase::Ready, Some(surface)) => frame.render_widget(surface, inner),
        _ => render_loading(frame, inner, app),
    }

    if app.view.subscription() == Subscription::Free {
        overlay::render(frame, inner, app);
    }
}

fn render_loading(frame: &mut Frame, area: Rect, app: &App) {
    let spinner = SPINNER_FRAMES[app.spinner % SPINNER_FRAMES.len()];
    let top = area.height / 2;
    let line_area = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top).min(1),
        ..area
    };
    let para = Paragraph::new(Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::raw(" Loading Trading Chart..."),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(para, line_area);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.view.subscription() {
        Subscription::Free => "[s]imulate payment [q]uit",
        Subscription::Subscribed => "[q]uit",
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
