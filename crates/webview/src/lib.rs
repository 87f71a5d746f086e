//! `RenderSurface` backed by the system web view (`wry`).
//!
//! The web view is a native child of the winit window. Engine callbacks
//! never touch the shell; they push `SurfaceEvent`s on the bus and wake the
//! event loop through the repaint handle.

use std::sync::{Arc, Mutex, mpsc::Sender};

use app_api::{RenderSurface, RepaintHandle, SurfaceError};
use bus::SurfaceEvent;
use core_types::{HistoryEntry, RequestId, SurfaceBounds};
use winit::window::Window;
use wry::{
    PageLoadEvent, Rect, WebView, WebViewBuilder,
    dpi::{PhysicalPosition, PhysicalSize},
};

mod script;
mod visits;

pub use visits::VisitLog;

/// Must run once before the first web view is created.
pub fn init_platform() -> Result<(), SurfaceError> {
    #[cfg(target_os = "linux")]
    {
        gtk::init().map_err(|e| SurfaceError::Unavailable(e.to_string()))?;
    }
    Ok(())
}

/// Lets the engine's own toolkit make progress; called from the winit loop.
pub fn pump_platform_events() {
    #[cfg(target_os = "linux")]
    {
        while gtk::events_pending() {
            gtk::main_iteration_do(false);
        }
    }
}

#[derive(Clone)]
struct Emitter {
    evt_tx: Sender<SurfaceEvent>,
    repaint: RepaintHandle,
}

impl Emitter {
    fn emit(&self, evt: SurfaceEvent) {
        if self.evt_tx.send(evt).is_err() {
            log::debug!("surface event dropped: shell is gone");
            return;
        }
        (self.repaint)();
    }
}

pub struct WebViewSurface {
    webview: WebView,
    visits: Arc<Mutex<VisitLog>>,
    emitter: Emitter,
}

impl WebViewSurface {
    pub fn new(
        window: &Window,
        start_url: &str,
        evt_tx: Sender<SurfaceEvent>,
        repaint: RepaintHandle,
    ) -> Result<Self, SurfaceError> {
        let emitter = Emitter { evt_tx, repaint };
        let visits = Arc::new(Mutex::new(VisitLog::default()));

        let load_emitter = emitter.clone();
        let load_visits = Arc::clone(&visits);
        let title_emitter = emitter.clone();
        let title_visits = Arc::clone(&visits);
        let nav_emitter = emitter.clone();
        let ipc_emitter = emitter.clone();

        let webview = WebViewBuilder::new()
            .with_url(start_url)
            .with_bounds(to_rect(SurfaceBounds {
                x: 0,
                y: 0,
                width: window.inner_size().width,
                height: window.inner_size().height,
            }))
            .with_devtools(cfg!(debug_assertions))
            .with_initialization_script(script::LOCATION_WATCH)
            .with_navigation_handler(move |url| {
                log::debug!("navigating to {url}");
                nav_emitter.emit(SurfaceEvent::UrlChanged(url));
                true
            })
            .with_ipc_handler(move |message| {
                if let Some(url) = script::decode_location(message.body()) {
                    ipc_emitter.emit(SurfaceEvent::UrlChanged(url));
                }
            })
            .with_on_page_load_handler(move |event, url| match event {
                PageLoadEvent::Started => {
                    log::debug!("page load started: {url}");
                    load_emitter.emit(SurfaceEvent::UrlChanged(url));
                }
                // The final URL differs from the started one after redirects.
                PageLoadEvent::Finished => {
                    log::info!("page loaded: {url}");
                    if let Ok(mut log) = load_visits.lock() {
                        log.record_visit(&url);
                    }
                    load_emitter.emit(SurfaceEvent::LoadFinished(url));
                }
            })
            .with_document_title_changed_handler(move |title| {
                if let Ok(mut log) = title_visits.lock() {
                    log.record_title(&title);
                }
                title_emitter.emit(SurfaceEvent::TitleChanged(title));
            })
            .build_as_child(window)
            .map_err(|e| SurfaceError::Unavailable(e.to_string()))?;

        log::info!("web view created, start url {start_url}");
        Ok(Self {
            webview,
            visits,
            emitter,
        })
    }

    fn run(&self, op: &'static str, js: &str) -> Result<(), SurfaceError> {
        self.webview
            .evaluate_script(js)
            .map_err(|e| SurfaceError::engine(op, e))
    }
}

impl RenderSurface for WebViewSurface {
    fn load(&mut self, url: &str) -> Result<(), SurfaceError> {
        log::info!("load {url}");
        self.webview
            .load_url(url)
            .map_err(|e| SurfaceError::engine("load url", e))
    }

    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError> {
        log::info!("load html ({} bytes)", html.len());
        self.webview
            .load_html(html)
            .map_err(|e| SurfaceError::engine("load html", e))
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.run("go back", script::GO_BACK)
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.run("go forward", script::GO_FORWARD)
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.run("reload", script::RELOAD)
    }

    fn stop(&mut self) -> Result<(), SurfaceError> {
        self.run("stop", script::STOP)
    }

    fn current_url(&self) -> Option<String> {
        self.webview.url().ok().filter(|u| !u.is_empty())
    }

    fn history_entries(&self) -> Vec<HistoryEntry> {
        match self.visits.lock() {
            Ok(log) => log.entries().to_vec(),
            Err(_) => Vec::new(),
        }
    }

    fn request_html_snapshot(&mut self, request_id: RequestId) -> Result<(), SurfaceError> {
        let emitter = self.emitter.clone();
        self.webview
            .evaluate_script_with_callback(script::OUTER_HTML, move |raw| {
                let evt = match script::decode_result(&raw) {
                    Ok(html) => SurfaceEvent::HtmlSnapshot { request_id, html },
                    Err(error) => SurfaceEvent::SnapshotFailed { request_id, error },
                };
                emitter.emit(evt);
            })
            .map_err(|e| SurfaceError::engine("serialize page", e))
    }

    fn find_in_page(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.run("find in page", &script::find(text))
    }

    fn print(&mut self) -> Result<(), SurfaceError> {
        self.webview
            .print()
            .map_err(|e| SurfaceError::engine("print", e))
    }

    fn set_bounds(&mut self, bounds: SurfaceBounds) -> Result<(), SurfaceError> {
        self.webview
            .set_bounds(to_rect(bounds))
            .map_err(|e| SurfaceError::engine("resize", e))
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| SurfaceError::engine("change visibility", e))
    }
}

fn to_rect(bounds: SurfaceBounds) -> Rect {
    Rect {
        position: PhysicalPosition::new(bounds.x, bounds.y).into(),
        size: PhysicalSize::new(bounds.width.max(1), bounds.height.max(1)).into(),
    }
}
