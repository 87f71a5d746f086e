use std::sync::Arc;

use bus::SurfaceEvent;
use core_types::{HistoryEntry, RequestId, SurfaceBounds, WindowRequest};
use egui::Context;

/// Wakes the event loop from engine callbacks.
pub type RepaintHandle = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("web engine failed to {op}: {reason}")]
    Engine { op: &'static str, reason: String },
    #[error("web engine unavailable: {0}")]
    Unavailable(String),
}

impl SurfaceError {
    pub fn engine(op: &'static str, reason: impl ToString) -> Self {
        Self::Engine {
            op,
            reason: reason.to_string(),
        }
    }
}

/// The embedded web engine, as seen by the shell.
///
/// Everything that touches network, DOM or scripts lives behind this
/// trait. Implementations report location changes and snapshots through
/// the bus (`SurfaceEvent`), never by calling back into the shell.
pub trait RenderSurface {
    fn load(&mut self, url: &str) -> Result<(), SurfaceError>;
    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError>;
    fn go_back(&mut self) -> Result<(), SurfaceError>;
    fn go_forward(&mut self) -> Result<(), SurfaceError>;
    fn reload(&mut self) -> Result<(), SurfaceError>;
    fn stop(&mut self) -> Result<(), SurfaceError>;
    fn current_url(&self) -> Option<String>;
    fn history_entries(&self) -> Vec<HistoryEntry>;
    /// Asks for the serialized page; the answer arrives as
    /// `SurfaceEvent::HtmlSnapshot` carrying the same `request_id`.
    fn request_html_snapshot(&mut self, request_id: RequestId) -> Result<(), SurfaceError>;
    fn find_in_page(&mut self, text: &str) -> Result<(), SurfaceError>;
    /// Shows the platform print dialog; cancelling it is not an error.
    fn print(&mut self) -> Result<(), SurfaceError>;
    fn set_bounds(&mut self, bounds: SurfaceBounds) -> Result<(), SurfaceError>;
    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError>;
}

pub trait UiApp {
    fn ui(&mut self, ctx: &Context);
    fn on_surface_event(&mut self, evt: SurfaceEvent);
    fn take_window_requests(&mut self) -> Vec<WindowRequest>;
    /// The window entered or left fullscreen, by any route.
    fn on_fullscreen_changed(&mut self, fullscreen: bool);
}
