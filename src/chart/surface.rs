//! Rendering surface contract and its terminal implementation.
//!
//! [`Surface`] is the narrow API the chart view drives: create series, push
//! points and markers, fit the visible range, follow the container width,
//! and dispose. [`TerminalSurface`] keeps that state in memory and draws it
//! with ratatui's [`Chart`] widget plus a one-row ribbon strip.

use std::collections::HashMap;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Widget},
};
use tracing::debug;

/// Opaque handle to a series owned by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

/// Kind of series to create.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesKind {
    #[default]
    Line,
}

/// Visual style of a series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesStyle {
    pub title: String,
    /// `#rrggbb` color.
    pub color: String,
    pub line_width: u8,
}

impl SeriesStyle {
    pub fn new(title: impl Into<String>, color: impl Into<String>, line_width: u8) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
            line_width,
        }
    }
}

/// One `(time, value)` pair of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub time: usize,
    pub value: f64,
}

/// Where a marker sits relative to its bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerPosition {
    #[default]
    InBar,
}

/// Glyph used for a marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerShape {
    #[default]
    Square,
}

/// A colored overlay attached to one time coordinate of a series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub time: usize,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    /// `#rrggbb` or `#rrggbbaa` color.
    pub color: String,
}

/// Options a surface is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceOptions {
    pub width: u16,
    pub height: u16,
}

/// Visible range computed by [`Surface::fit_content`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Operations a chart view may perform on a rendering surface.
pub trait Surface {
    /// Creates an empty series and returns its handle.
    fn add_series(&mut self, kind: SeriesKind, style: SeriesStyle) -> SeriesId;

    /// Removes a series and its markers. Unknown handles are ignored.
    fn remove_series(&mut self, id: SeriesId);

    /// Replaces the points of a series.
    fn set_data(&mut self, id: SeriesId, points: Vec<Point>);

    /// Replaces the markers attached to a series.
    fn set_markers(&mut self, id: SeriesId, markers: Vec<Marker>);

    /// Fits the visible range to the pushed data.
    fn fit_content(&mut self);

    /// Resizes the surface horizontally.
    fn apply_width(&mut self, width: u16);

    /// Disposes the surface. Further calls are ignored.
    fn remove(&mut self);
}

#[derive(Debug)]
struct SeriesState {
    id: SeriesId,
    kind: SeriesKind,
    style: SeriesStyle,
    coords: Vec<(f64, f64)>,
    markers: Vec<Marker>,
}

/// In-memory surface drawn into a ratatui buffer.
#[derive(Debug)]
pub struct TerminalSurface {
    width: u16,
    height: u16,
    next_id: u64,
    series: Vec<SeriesState>,
    bounds: Option<Bounds>,
    removed: bool,
}

impl TerminalSurface {
    /// Creates a surface with the given options.
    #[must_use]
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            next_id: 1,
            series: Vec::new(),
            bounds: None,
            removed: false,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of live series.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Titles of the live series, in creation order.
    pub fn series_titles(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.style.title.as_str()).collect()
    }

    /// Points of the first live series with `title`.
    pub fn points(&self, title: &str) -> Option<Vec<Point>> {
        self.find(title).map(|s| {
            s.coords
                .iter()
                .map(|&(x, y)| Point {
                    time: x as usize,
                    value: y,
                })
                .collect()
        })
    }

    /// Markers of the first live series with `title`.
    pub fn markers(&self, title: &str) -> Option<&[Marker]> {
        self.find(title).map(|s| s.markers.as_slice())
    }

    /// Visible range from the last [`Surface::fit_content`] call.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    fn find(&self, title: &str) -> Option<&SeriesState> {
        self.series.iter().find(|s| s.style.title == title)
    }

    fn get_mut(&mut self, id: SeriesId) -> Option<&mut SeriesState> {
        self.series.iter_mut().find(|s| s.id == id)
    }

    fn render_ribbon(&self, area: Rect, buf: &mut Buffer, bounds: Bounds) {
        let colors: HashMap<usize, Color> = self
            .series
            .iter()
            .flat_map(|s| s.markers.iter())
            .map(|m| (m.time, hex_color(&m.color)))
            .collect();
        if colors.is_empty() || area.width == 0 {
            return;
        }

        let [x0, x1] = bounds.x;
        let span = (x1 - x0).max(0.0);
        let last_col = area.width.saturating_sub(1).max(1) as f64;
        for col in 0..area.width {
            let time = (x0 + span * col as f64 / last_col).round() as usize;
            if let Some(&color) = colors.get(&time) {
                buf[(area.x + col, area.y)]
                    .set_symbol("■")
                    .set_style(Style::default().fg(color));
            }
        }
    }
}

impl Surface for TerminalSurface {
    fn add_series(&mut self, kind: SeriesKind, style: SeriesStyle) -> SeriesId {
        let id = SeriesId(self.next_id);
        self.next_id += 1;
        if self.removed {
            debug!(title = %style.title, "Ignoring add_series on removed surface");
            return id;
        }
        self.series.push(SeriesState {
            id,
            kind,
            style,
            coords: Vec::new(),
            markers: Vec::new(),
        });
        id
    }

    fn remove_series(&mut self, id: SeriesId) {
        self.series.retain(|s| s.id != id);
    }

    fn set_data(&mut self, id: SeriesId, points: Vec<Point>) {
        if let Some(series) = self.get_mut(id) {
            series.coords = points
                .into_iter()
                .map(|p| (p.time as f64, p.value))
                .collect();
        }
    }

    fn set_markers(&mut self, id: SeriesId, markers: Vec<Marker>) {
        if let Some(series) = self.get_mut(id) {
            series.markers = markers;
        }
    }

    fn fit_content(&mut self) {
        let mut coords = self.series.iter().flat_map(|s| s.coords.iter());
        let Some(&(x, y)) = coords.next() else {
            self.bounds = None;
            return;
        };
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (x, x, y, y);
        for &(x, y) in coords {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        // Keep a flat line off the frame edges.
        let pad = ((y_max - y_min) * 0.05).max(f64::EPSILON.max(y_max.abs() * 0.001));
        self.bounds = Some(Bounds {
            x: [x_min, x_max.max(x_min + 1.0)],
            y: [y_min - pad, y_max + pad],
        });
    }

    fn apply_width(&mut self, width: u16) {
        if !self.removed {
            self.width = width;
        }
    }

    fn remove(&mut self) {
        self.series.clear();
        self.bounds = None;
        self.removed = true;
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.removed {
            return;
        }
        let area = Rect {
            width: area.width.min(self.width),
            height: area.height.min(self.height),
            ..area
        };
        let Some(bounds) = self.bounds else {
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let datasets: Vec<Dataset> = self
            .series
            .iter()
            .filter(|s| s.kind == SeriesKind::Line)
            .map(|s| {
                let mut style = Style::default().fg(hex_color(&s.style.color));
                if s.style.line_width >= 3 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Dataset::default()
                    .name(s.style.title.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(style)
                    .data(&s.coords)
            })
            .collect();

        let [y0, y1] = bounds.y;
        let [x0, x1] = bounds.x;
        let chart = Chart::new(datasets)
            .legend_position(Some(LegendPosition::TopLeft))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds(bounds.x)
                    .labels([format!("{x0:.0}"), format!("{x1:.0}")]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds(bounds.y)
                    .labels([format!("{y0:.2}"), format!("{y1:.2}")]),
            );
        chart.render(rows[0], buf);

        self.render_ribbon(rows[1], buf, bounds);
    }
}

/// Converts `#rrggbb` (an optional trailing alpha pair is ignored) into a
/// terminal color, falling back to the default foreground.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 && digits.len() != 8 {
        return Color::Reset;
    }
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}
