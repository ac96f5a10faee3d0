//! Shared test utilities.

#![allow(dead_code)]

use ribbon::chart::{
    Marker, Point, SeriesId, SeriesKind, SeriesStyle, Surface, SurfaceOptions, TerminalSurface,
};
use ribbon::models::{Sample, parse_samples};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 100 samples in the shape the market-data endpoint returns.
pub const MARKET_DATA_JSON: &str = include_str!("../fixtures/market_data.json");

/// A payload whose second entry has no price.
pub const MALFORMED_JSON: &str = include_str!("../fixtures/malformed.json");

pub fn market_data() -> Vec<Sample> {
    parse_samples(MARKET_DATA_JSON).expect("fixture parses")
}

/// A surface call, as seen by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddSeries(String),
    RemoveSeries(SeriesId),
    SetData(SeriesId, usize),
    SetMarkers(SeriesId, usize),
    FitContent,
    ApplyWidth(u16),
    Remove,
}

/// Terminal surface that also logs every call made on it.
pub struct RecordingSurface {
    pub inner: TerminalSurface,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            inner: TerminalSurface::new(SurfaceOptions {
                width: 80,
                height: 24,
            }),
            ops: Vec::new(),
        }
    }

    pub fn count(&self, matches: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| matches(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn add_series(&mut self, kind: SeriesKind, style: SeriesStyle) -> SeriesId {
        self.ops.push(Op::AddSeries(style.title.clone()));
        self.inner.add_series(kind, style)
    }

    fn remove_series(&mut self, id: SeriesId) {
        self.ops.push(Op::RemoveSeries(id));
        self.inner.remove_series(id);
    }

    fn set_data(&mut self, id: SeriesId, points: Vec<Point>) {
        self.ops.push(Op::SetData(id, points.len()));
        self.inner.set_data(id, points);
    }

    fn set_markers(&mut self, id: SeriesId, markers: Vec<Marker>) {
        self.ops.push(Op::SetMarkers(id, markers.len()));
        self.inner.set_markers(id, markers);
    }

    fn fit_content(&mut self) {
        self.ops.push(Op::FitContent);
        self.inner.fit_content();
    }

    fn apply_width(&mut self, width: u16) {
        self.ops.push(Op::ApplyWidth(width));
        self.inner.apply_width(width);
    }

    fn remove(&mut self) {
        self.ops.push(Op::Remove);
        self.inner.remove();
    }
}

/// Serves exactly one HTTP response on a local port and returns the URL.
pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}/api/market-data")
}
