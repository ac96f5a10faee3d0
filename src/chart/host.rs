//! Lifecycle owner of the single rendering surface.
//!
//! The terminal viewport stands in for the mount point: its size is
//! published on a [`tokio::sync::watch`] channel and every mounted host holds
//! one receiver as its resize listener. Dropping the receiver on unmount is
//! what deregisters the listener, so [`Viewport::listener_count`] returns to
//! its previous value once a host goes away.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::surface::{Surface, SurfaceOptions};

/// Fixed surface height in terminal rows.
pub const CHART_HEIGHT: u16 = 24;

/// Size of the viewport in terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Mount point whose size changes on terminal resize events.
#[derive(Debug)]
pub struct Viewport {
    size: watch::Sender<Size>,
}

impl Viewport {
    /// Creates a viewport with an initial size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: watch::Sender::new(Size { width, height }),
        }
    }

    /// Publishes a new size to every registered listener.
    pub fn resize(&self, width: u16, height: u16) {
        self.size.send_replace(Size { width, height });
    }

    /// Current size.
    pub fn size(&self) -> Size {
        *self.size.borrow()
    }

    /// Number of resize listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.size.receiver_count()
    }

    fn listen(&self) -> watch::Receiver<Size> {
        self.size.subscribe()
    }
}

/// Owns one rendering surface for the lifetime of a mount.
#[derive(Debug)]
pub struct ChartHost<S: Surface> {
    surface: Option<S>,
    listener: Option<watch::Receiver<Size>>,
}

impl<S: Surface> ChartHost<S> {
    /// Mounts a host on `viewport`.
    ///
    /// Creates exactly one surface sized to the viewport width and
    /// [`CHART_HEIGHT`], registers a resize listener, then hands the surface
    /// to `on_ready` once. With no viewport nothing is created and
    /// `on_ready` is never called. A failing `create` is logged and leaves
    /// the host without a surface.
    pub fn mount<C, R>(viewport: Option<&Viewport>, create: C, on_ready: R) -> Self
    where
        C: FnOnce(SurfaceOptions) -> crate::Result<S>,
        R: FnOnce(&mut S),
    {
        let Some(viewport) = viewport else {
            debug!("No viewport to mount chart on");
            return Self::detached();
        };

        let size = viewport.size();
        let options = SurfaceOptions {
            width: size.width,
            height: CHART_HEIGHT,
        };
        let mut surface = match create(options) {
            Ok(surface) => surface,
            Err(e) => {
                warn!("Failed to create chart surface: {e}");
                return Self::detached();
            }
        };

        let mut listener = viewport.listen();
        listener.mark_unchanged();
        info!(width = size.width, height = CHART_HEIGHT, "Chart surface mounted");

        on_ready(&mut surface);

        Self {
            surface: Some(surface),
            listener: Some(listener),
        }
    }

    fn detached() -> Self {
        Self {
            surface: None,
            listener: None,
        }
    }

    /// Applies the latest viewport width if it changed since the last call.
    ///
    /// Returns `true` when the surface was resized.
    pub fn sync_size(&mut self) -> bool {
        let (Some(listener), Some(surface)) = (self.listener.as_mut(), self.surface.as_mut()) else {
            return false;
        };
        if !listener.has_changed().unwrap_or(false) {
            return false;
        }
        let size = *listener.borrow_and_update();
        surface.apply_width(size.width);
        debug!(width = size.width, "Chart surface resized");
        true
    }

    /// Disposes the surface and deregisters the resize listener.
    ///
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        self.listener = None;
        if let Some(mut surface) = self.surface.take() {
            surface.remove();
            info!("Chart surface removed");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
}

impl<S: Surface> Drop for ChartHost<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
