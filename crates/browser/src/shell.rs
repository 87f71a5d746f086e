use std::{
    collections::HashMap,
    io::{self, Write},
    path::PathBuf,
};

use app_api::{RenderSurface, SurfaceError, UiApp};
use bus::SurfaceEvent;
use core_types::{BrowserInput, RequestId, SurfaceBounds, WindowRequest};
use egui::{CentralPanel, Context, Frame, Key, Modifiers, Popup, Rect};
use gfx::ui::{menu_bar, status_bar, top_bar};

use crate::commands::Command;
use crate::config::ShellConfig;
use crate::files::{self, FileDialogs};
use crate::history::write_history;
use crate::nav::NavigationState;
use crate::notice::Notice;

/// The browser window's chrome around one render surface.
pub struct ShellApp {
    config: ShellConfig,
    surface: Box<dyn RenderSurface>,
    dialogs: Box<dyn FileDialogs>,
    console: Box<dyn Write>,

    nav: NavigationState,
    // last location reported by the engine, unlike `nav` never user-edited
    engine_location: Option<String>,
    fullscreen: bool,
    notice: Option<Notice>,

    pending_saves: HashMap<RequestId, PathBuf>,
    next_request_id: RequestId,

    window_requests: Vec<WindowRequest>,
    surface_bounds: Option<SurfaceBounds>,
    surface_visible: bool,
}

impl ShellApp {
    pub fn new(
        config: ShellConfig,
        surface: Box<dyn RenderSurface>,
        dialogs: Box<dyn FileDialogs>,
    ) -> Self {
        let nav = NavigationState::new(&config.start_url);
        Self {
            config,
            surface,
            dialogs,
            console: Box::new(io::stdout()),
            nav,
            engine_location: None,
            fullscreen: false,
            notice: None,
            pending_saves: HashMap::new(),
            next_request_id: 1,
            window_requests: Vec::new(),
            surface_bounds: None,
            surface_visible: true,
        }
    }

    /// Where Show History writes; stdout by default.
    pub fn with_console(mut self, console: Box<dyn Write>) -> Self {
        self.console = console;
        self
    }

    pub fn url_field(&self) -> &str {
        self.nav.location()
    }

    pub fn url_field_mut(&mut self) -> &mut String {
        self.nav.location_mut()
    }

    pub fn cursor(&self) -> usize {
        self.nav.cursor()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dispatch(&mut self, cmd: Command) {
        log::debug!("dispatch {}", cmd.label());
        match cmd {
            Command::Back => self.engine_call(|s| s.go_back()),
            Command::Forward => self.engine_call(|s| s.go_forward()),
            Command::Reload => self.engine_call(|s| s.reload()),
            Command::Stop => self.engine_call(|s| s.stop()),
            Command::Home => {
                let home = self.config.home_url.clone();
                self.navigate(&home);
            }
            Command::Navigate(text) => self.navigate(&text),
            Command::ShowHistory => self.show_history(),
            Command::OpenFile => self.open_file(),
            Command::SavePage => self.save_page(),
            Command::Print => self.engine_call(|s| s.print()),
            Command::Find(text) => self.engine_call(|s| s.find_in_page(&text)),
            Command::ToggleFullscreen => self.toggle_fullscreen(),
        }
    }

    // -- Command handlers ---
    fn navigate(&mut self, text: &str) {
        *self.nav.location_mut() = text.to_string();
        let Some(target) = self.nav.submit() else {
            log::debug!("ignoring empty navigation");
            return;
        };
        self.engine_call(|s| s.load(&target));
    }

    fn show_history(&mut self) {
        let entries = self.surface.history_entries();
        log::debug!(
            "history has {} entries, current {:?}",
            entries.len(),
            self.surface.current_url()
        );
        if let Err(e) = write_history(&mut self.console, &entries) {
            log::warn!("could not print history: {e}");
        }
    }

    fn open_file(&mut self) {
        let Some(path) = self.dialogs.pick_open() else {
            return;
        };
        let html = match files::read_page(&path) {
            Ok(html) => html,
            Err(e) => {
                log::error!("{e}");
                self.notice = Some(Notice::error(e.to_string()));
                return;
            }
        };
        if let Err(e) = self.surface.load_html(&html) {
            self.report_engine_error(e);
            return;
        }
        log::info!("opened {}", path.display());
        self.nav.show_path(&path.display().to_string());
        self.notice = Some(Notice::info(format!("Opened {}", path.display())));
    }

    fn save_page(&mut self) {
        let Some(path) = self.dialogs.pick_save() else {
            return;
        };
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);

        match self.surface.request_html_snapshot(request_id) {
            Ok(()) => {
                self.pending_saves.insert(request_id, path);
            }
            Err(e) => self.report_engine_error(e),
        }
    }

    fn finish_save(&mut self, request_id: RequestId, html: &str) {
        let Some(path) = self.pending_saves.remove(&request_id) else {
            log::debug!("snapshot {request_id} has no pending save");
            return;
        };
        match files::write_page(&path, html) {
            Ok(()) => {
                log::info!("saved {} ({} bytes)", path.display(), html.len());
                self.nav.show_path(&path.display().to_string());
                self.notice = Some(Notice::info(format!("Saved {}", path.display())));
            }
            Err(e) => {
                log::error!("{e}");
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    fn follow_engine_location(&mut self, url: &str) {
        let url = url.trim();
        let moved = self
            .engine_location
            .as_deref()
            .is_some_and(|prev| without_fragment(prev) != without_fragment(url));
        if moved {
            self.abandon_pending_saves();
        }
        self.engine_location = Some(url.to_string());

        if let Some(shown) = self.nav.apply_engine_location(url) {
            log::debug!("location now {shown}");
        }
    }

    /// Snapshots requested for a page that is no longer shown would save the
    /// wrong document; drop them and tell the user.
    fn abandon_pending_saves(&mut self) {
        if self.pending_saves.is_empty() {
            return;
        }
        let paths: Vec<String> = self
            .pending_saves
            .drain()
            .map(|(_, path)| path.display().to_string())
            .collect();
        log::warn!("page changed before it could be saved to {}", paths.join(", "));
        self.notice = Some(Notice::error(format!(
            "page changed before it could be saved to {}",
            paths.join(", ")
        )));
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.window_requests
            .push(WindowRequest::Fullscreen(self.fullscreen));
    }

    // -- Internal Helpers ---
    fn engine_call(
        &mut self,
        call: impl FnOnce(&mut Box<dyn RenderSurface>) -> Result<(), SurfaceError>,
    ) {
        if let Err(e) = call(&mut self.surface) {
            self.report_engine_error(e);
        }
    }

    fn report_engine_error(&mut self, e: SurfaceError) {
        log::warn!("{e}");
        self.notice = Some(Notice::error(e.to_string()));
    }

    fn window_title(&self, page_title: &str) -> String {
        let page_title = page_title.trim();
        if page_title.is_empty() {
            self.config.app_name.clone()
        } else {
            format!("{page_title} - {}", self.config.app_name)
        }
    }

    /// Keeps the native web view over the central panel, and out of the
    /// way while an egui popup (menu) is open.
    fn place_surface(&mut self, ctx: &Context, content: Rect) {
        let visible = !Popup::is_any_open(ctx);
        if visible != self.surface_visible {
            self.surface_visible = visible;
            self.engine_call(|s| s.set_visible(visible));
        }

        let ppp = ctx.pixels_per_point();
        let bounds = SurfaceBounds {
            x: (content.min.x * ppp).round() as i32,
            y: (content.min.y * ppp).round() as i32,
            width: (content.width() * ppp).round().max(1.0) as u32,
            height: (content.height() * ppp).round().max(1.0) as u32,
        };
        if self.surface_bounds != Some(bounds) {
            self.surface_bounds = Some(bounds);
            self.engine_call(|s| s.set_bounds(bounds));
        }
    }
}

fn without_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(document, _)| document)
}

impl UiApp for ShellApp {
    fn ui(&mut self, ctx: &Context) {
        let input = BrowserInput {
            enter_pressed: ctx.input(|i| i.key_pressed(Key::Enter)),
            fullscreen_pressed: ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::F11)),
        };

        let menu = menu_bar(ctx, self.fullscreen);
        let reset_cursor = self.nav.take_cursor_reset();
        let nav = top_bar(ctx, self.nav.location_mut(), reset_cursor, input);

        let tip = nav.hovered_tip.or(menu.hovered_tip);
        let notice = self
            .notice
            .as_ref()
            .map(|n| (n.message.as_str(), n.is_error()));
        status_bar(ctx, tip, notice);

        let content = CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| ui.max_rect())
            .inner;

        let mut commands = Command::from_menu(&menu, input);
        commands.extend(Command::from_navigation(&nav));
        for cmd in commands {
            self.dispatch(cmd);
        }

        self.place_surface(ctx, content);
    }

    fn on_surface_event(&mut self, evt: SurfaceEvent) {
        match evt {
            SurfaceEvent::UrlChanged(url) => self.follow_engine_location(&url),
            SurfaceEvent::TitleChanged(title) => {
                let title = self.window_title(&title);
                self.window_requests.push(WindowRequest::Title(title));
            }
            SurfaceEvent::LoadFinished(url) => {
                log::debug!("load finished: {url}");
                self.follow_engine_location(&url);
                if self.notice.as_ref().is_some_and(|n| !n.is_error()) {
                    self.notice = None;
                }
            }
            SurfaceEvent::HtmlSnapshot { request_id, html } => {
                self.finish_save(request_id, &html);
            }
            SurfaceEvent::SnapshotFailed { request_id, error } => {
                if let Some(path) = self.pending_saves.remove(&request_id) {
                    log::error!("could not serialize page for {}: {error}", path.display());
                    self.notice = Some(Notice::error(format!(
                        "could not save {}: {error}",
                        path.display()
                    )));
                }
            }
        }
    }

    fn take_window_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.window_requests)
    }

    fn on_fullscreen_changed(&mut self, fullscreen: bool) {
        if self.fullscreen != fullscreen {
            log::debug!("window fullscreen is now {fullscreen}");
            self.fullscreen = fullscreen;
        }
    }
}
