//! Price chart: the rendering surface, its lifecycle host, and the
//! data-bound view that fills it.

pub mod host;
pub mod surface;
pub mod view;

pub use host::{CHART_HEIGHT, ChartHost, Size, Viewport};
pub use surface::{
    Bounds, Marker, MarkerPosition, MarkerShape, Point, SeriesId, SeriesKind, SeriesStyle,
    Surface, SurfaceOptions, TerminalSurface,
};
pub use view::{
    ChartView, EXPECTED_SAMPLE_COUNT, FREE_SAMPLE_CAP, MountScope, Phase, ScopeToken,
    Subscription, Summary, display_subset,
};
