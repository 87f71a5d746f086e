use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, Write},
    path::PathBuf,
    rc::Rc,
};

use app_api::{RenderSurface, SurfaceError, UiApp};
use browser::{Command, FileDialogs, ShellApp, ShellConfig};
use bus::SurfaceEvent;
use core_types::{HistoryEntry, RequestId, SurfaceBounds, WindowRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(String),
    LoadHtml(String),
    Back,
    Forward,
    Reload,
    Stop,
    Snapshot(RequestId),
    Find(String),
    Print,
}

#[derive(Default)]
struct Recorded {
    calls: Vec<Call>,
    history: Vec<HistoryEntry>,
    fail_next: bool,
}

#[derive(Clone, Default)]
struct FakeSurface(Rc<RefCell<Recorded>>);

impl FakeSurface {
    fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    fn record(&self, call: Call) -> Result<(), SurfaceError> {
        let mut rec = self.0.borrow_mut();
        if std::mem::take(&mut rec.fail_next) {
            return Err(SurfaceError::engine("test", "refused"));
        }
        rec.calls.push(call);
        Ok(())
    }

    fn last_snapshot_id(&self) -> RequestId {
        self.calls()
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::Snapshot(id) => Some(*id),
                _ => None,
            })
            .expect("snapshot requested")
    }
}

impl RenderSurface for FakeSurface {
    fn load(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.record(Call::Load(url.into()))
    }
    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.record(Call::LoadHtml(html.into()))
    }
    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Back)
    }
    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Forward)
    }
    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Reload)
    }
    fn stop(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Stop)
    }
    fn current_url(&self) -> Option<String> {
        None
    }
    fn history_entries(&self) -> Vec<HistoryEntry> {
        self.0.borrow().history.clone()
    }
    fn request_html_snapshot(&mut self, request_id: RequestId) -> Result<(), SurfaceError> {
        self.record(Call::Snapshot(request_id))
    }
    fn find_in_page(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.record(Call::Find(text.into()))
    }
    fn print(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Print)
    }
    fn set_bounds(&mut self, _bounds: SurfaceBounds) -> Result<(), SurfaceError> {
        Ok(())
    }
    fn set_visible(&mut self, _visible: bool) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Answers dialogs from a queue; an empty queue means "cancelled".
#[derive(Clone, Default)]
struct FakeDialogs(Rc<RefCell<VecDeque<PathBuf>>>);

impl FakeDialogs {
    fn answer(&self, path: PathBuf) {
        self.0.borrow_mut().push_back(path);
    }
}

impl FileDialogs for FakeDialogs {
    fn pick_open(&mut self) -> Option<PathBuf> {
        self.0.borrow_mut().pop_front()
    }
    fn pick_save(&mut self) -> Option<PathBuf> {
        self.0.borrow_mut().pop_front()
    }
}

#[derive(Clone, Default)]
struct Console(Rc<RefCell<Vec<u8>>>);

impl Console {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Harness {
    shell: ShellApp,
    surface: FakeSurface,
    dialogs: FakeDialogs,
    console: Console,
}

fn harness() -> Harness {
    let surface = FakeSurface::default();
    let dialogs = FakeDialogs::default();
    let console = Console::default();
    let config = ShellConfig {
        home_url: "https://home.test/".into(),
        start_url: "https://start.test/".into(),
        ..ShellConfig::default()
    };
    let shell = ShellApp::new(config, Box::new(surface.clone()), Box::new(dialogs.clone()))
        .with_console(Box::new(console.clone()));
    Harness {
        shell,
        surface,
        dialogs,
        console,
    }
}

#[test]
fn field_starts_at_start_url() {
    let h = harness();
    assert_eq!(h.shell.url_field(), "https://start.test/");
    assert!(h.surface.calls().is_empty());
}

#[test]
fn bare_host_navigates_with_http_prefix() {
    let mut h = harness();
    h.shell.dispatch(Command::Navigate("example.com".into()));
    assert_eq!(h.surface.calls(), vec![Call::Load("http://example.com".into())]);
    assert_eq!(h.shell.url_field(), "http://example.com");
}

#[test]
fn url_with_scheme_navigates_unchanged() {
    let mut h = harness();
    h.shell.dispatch(Command::Navigate("http://example.com".into()));
    assert_eq!(h.surface.calls(), vec![Call::Load("http://example.com".into())]);
}

#[test]
fn empty_submission_is_ignored() {
    let mut h = harness();
    h.shell.url_field_mut().clear();
    h.shell.dispatch(Command::Navigate("   ".into()));
    assert!(h.surface.calls().is_empty());
}

#[test]
fn home_loads_configured_url() {
    let mut h = harness();
    h.shell.dispatch(Command::Home);
    assert_eq!(h.surface.calls(), vec![Call::Load("https://home.test/".into())]);
}

#[test]
fn toolbar_actions_delegate_one_call_each() {
    let mut h = harness();
    for cmd in [Command::Back, Command::Forward, Command::Reload, Command::Stop, Command::Print] {
        h.shell.dispatch(cmd);
    }
    assert_eq!(
        h.surface.calls(),
        vec![Call::Back, Call::Forward, Call::Reload, Call::Stop, Call::Print]
    );
}

#[test]
fn find_forwards_query_verbatim() {
    let mut h = harness();
    h.shell.dispatch(Command::Find(String::new()));
    assert_eq!(h.surface.calls(), vec![Call::Find(String::new())]);
}

#[test]
fn engine_location_change_is_prefixed_and_cursor_reset() {
    let mut h = harness();
    h.shell.url_field_mut().push_str("typing");
    h.shell
        .on_surface_event(SurfaceEvent::UrlChanged("example.com/next".into()));
    assert_eq!(h.shell.url_field(), "http://example.com/next");
    assert_eq!(h.shell.cursor(), 0);
}

#[test]
fn history_prints_one_line_per_entry() {
    let mut h = harness();
    h.shell.dispatch(Command::ShowHistory);
    assert_eq!(h.console.text(), "");

    h.surface.0.borrow_mut().history = vec![
        HistoryEntry::new("https://a.test/", "A"),
        HistoryEntry::new("https://b.test/", "B"),
    ];
    h.shell.dispatch(Command::ShowHistory);
    assert_eq!(
        h.console.text(),
        "Visited:  https://a.test/\nVisited:  https://b.test/\n"
    );
}

#[test]
fn open_file_loads_raw_content_and_shows_path() {
    let mut h = harness();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not <really html").unwrap();

    h.dialogs.answer(path.clone());
    h.shell.dispatch(Command::OpenFile);

    assert_eq!(h.surface.calls(), vec![Call::LoadHtml("not <really html".into())]);
    assert_eq!(h.shell.url_field(), path.display().to_string());

    // the engine's placeholder location for raw content keeps the path visible
    h.shell
        .on_surface_event(SurfaceEvent::UrlChanged("about:blank".into()));
    assert_eq!(h.shell.url_field(), path.display().to_string());
}

#[test]
fn unreadable_file_raises_notice_and_loads_nothing() {
    let mut h = harness();
    let dir = tempfile::tempdir().unwrap();
    h.dialogs.answer(dir.path().join("missing.html"));

    h.shell.dispatch(Command::OpenFile);

    assert!(h.surface.calls().is_empty());
    let notice = h.shell.notice().expect("notice");
    assert!(notice.is_error());
    assert!(notice.message.contains("missing.html"));
    assert_eq!(h.shell.url_field(), "https://start.test/");
}

#[test]
fn cancelled_dialogs_do_nothing() {
    let mut h = harness();
    h.shell.dispatch(Command::OpenFile);
    h.shell.dispatch(Command::SavePage);
    assert!(h.surface.calls().is_empty());
    assert!(h.shell.notice().is_none());
}

#[test]
fn save_then_open_round_trips_bytes() {
    let mut h = harness();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    let html = "<html><head><title>é</title></head><body>\r\n<p>x</p></body></html>";

    h.dialogs.answer(path.clone());
    h.shell.dispatch(Command::SavePage);
    let id = h.surface.last_snapshot_id();
    h.shell.on_surface_event(SurfaceEvent::HtmlSnapshot {
        request_id: id,
        html: html.into(),
    });

    assert_eq!(std::fs::read_to_string(&path).unwrap(), html);
    assert_eq!(h.shell.url_field(), path.display().to_string());

    h.dialogs.answer(path.clone());
    h.shell.dispatch(Command::OpenFile);
    assert_eq!(h.surface.calls().last(), Some(&Call::LoadHtml(html.into())));
}

#[test]
fn snapshot_for_unknown_request_is_ignored() {
    let mut h = harness();
    h.shell.on_surface_event(SurfaceEvent::HtmlSnapshot {
        request_id: 99,
        html: "<p>stray</p>".into(),
    });
    assert!(h.shell.notice().is_none());
}

#[test]
fn failed_snapshot_reports_error() {
    let mut h = harness();
    let dir = tempfile::tempdir().unwrap();
    h.dialogs.answer(dir.path().join("out.html"));
    h.shell.dispatch(Command::SavePage);
    let id = h.surface.last_snapshot_id();

    h.shell.on_surface_event(SurfaceEvent::SnapshotFailed {
        request_id: id,
        error: "page has no document".into(),
    });

    assert!(h.shell.notice().unwrap().is_error());
    assert!(!dir.path().join("out.html").exists());
}

#[test]
fn engine_error_becomes_notice() {
    let mut h = harness();
    h.surface.0.borrow_mut().fail_next = true;
    h.shell.dispatch(Command::Reload);
    assert!(h.shell.notice().unwrap().is_error());
}

#[test]
fn fullscreen_toggle_twice_returns_to_normal() {
    let mut h = harness();
    assert!(!h.shell.is_fullscreen());

    h.shell.dispatch(Command::ToggleFullscreen);
    assert!(h.shell.is_fullscreen());
    h.shell.dispatch(Command::ToggleFullscreen);
    assert!(!h.shell.is_fullscreen());

    assert_eq!(
        h.shell.take_window_requests(),
        vec![
            WindowRequest::Fullscreen(true),
            WindowRequest::Fullscreen(false),
        ]
    );
    assert!(h.shell.take_window_requests().is_empty());
}

#[test]
fn page_title_updates_window_title() {
    let mut h = harness();
    h.shell
        .on_surface_event(SurfaceEvent::TitleChanged("Example".into()));
    h.shell.on_surface_event(SurfaceEvent::TitleChanged("  ".into()));
    assert_eq!(
        h.shell.take_window_requests(),
        vec![
            WindowRequest::Title("Example - Simple Web Browser".into()),
            WindowRequest::Title("Simple Web Browser".into()),
        ]
    );
}

#[test]
fn field_follows_redirected_final_location() {
    let mut h = harness();
    h.shell.dispatch(Command::Navigate("a.test".into()));
    h.shell
        .on_surface_event(SurfaceEvent::UrlChanged("http://a.test".into()));
    assert_eq!(h.shell.url_field(), "http://a.test");

    h.shell
        .on_surface_event(SurfaceEvent::LoadFinished("https://a.test/".into()));
    assert_eq!(h.shell.url_field(), "https://a.test/");
    assert_eq!(h.shell.cursor(), 0);
}

#[test]
fn same_document_location_change_reaches_field() {
    let mut h = harness();
    h.shell
        .on_surface_event(SurfaceEvent::LoadFinished("https://a.test/".into()));
    h.shell
        .on_surface_event(SurfaceEvent::UrlChanged("https://a.test/#section".into()));
    assert_eq!(h.shell.url_field(), "https://a.test/#section");
}

#[test]
fn navigating_away_abandons_pending_save() {
    let mut h = harness();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.html");
    h.shell
        .on_surface_event(SurfaceEvent::LoadFinished("https://a.test/".into()));

    h.dialogs.answer(path.clone());
    h.shell.dispatch(Command::SavePage);
    let id = h.surface.last_snapshot_id();

    h.shell
        .on_surface_event(SurfaceEvent::UrlChanged("https://b.test/".into()));
    let notice = h.shell.notice().expect("notice");
    assert!(notice.is_error());
    assert!(notice.message.contains("old.html"));

    // the late snapshot belongs to a save nobody is waiting for
    h.shell.on_surface_event(SurfaceEvent::HtmlSnapshot {
        request_id: id,
        html: "<p>b</p>".into(),
    });
    assert!(!path.exists());
}

#[test]
fn pending_save_survives_load_of_same_page() {
    let mut h = harness();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    h.shell
        .on_surface_event(SurfaceEvent::UrlChanged("https://a.test/".into()));

    h.dialogs.answer(path.clone());
    h.shell.dispatch(Command::SavePage);
    let id = h.surface.last_snapshot_id();

    h.shell
        .on_surface_event(SurfaceEvent::LoadFinished("https://a.test/#top".into()));
    h.shell.on_surface_event(SurfaceEvent::HtmlSnapshot {
        request_id: id,
        html: "<p>a</p>".into(),
    });
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>a</p>");
    assert!(!h.shell.notice().unwrap().is_error());
}

#[test]
fn fullscreen_left_by_window_manager_is_reconciled() {
    let mut h = harness();
    h.shell.dispatch(Command::ToggleFullscreen);
    h.shell.on_fullscreen_changed(true);
    assert!(h.shell.is_fullscreen());

    h.shell.on_fullscreen_changed(false);
    assert!(!h.shell.is_fullscreen());

    h.shell.dispatch(Command::ToggleFullscreen);
    assert_eq!(
        h.shell.take_window_requests(),
        vec![
            WindowRequest::Fullscreen(true),
            WindowRequest::Fullscreen(true),
        ]
    );
}
