use core_types::BrowserInput;
use gfx::ui::{MenuIntent, NavigationIntent};

/// One variant per UI affordance; `ShellApp::dispatch` has exactly one
/// handler per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Back,
    Forward,
    Reload,
    Stop,
    Home,
    Navigate(String),
    ShowHistory,
    OpenFile,
    SavePage,
    Print,
    Find(String),
    ToggleFullscreen,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Back => "Back",
            Command::Forward => "Forward",
            Command::Reload => "Reload",
            Command::Stop => "Stop",
            Command::Home => "Home",
            Command::Navigate(_) => "Navigate",
            Command::ShowHistory => "History",
            Command::OpenFile => "Open File",
            Command::SavePage => "Save Page",
            Command::Print => "Print",
            Command::Find(_) => "Find",
            Command::ToggleFullscreen => "Toggle Fullscreen",
        }
    }

    pub fn from_navigation(intent: &NavigationIntent) -> Vec<Command> {
        let table = [
            (intent.go_back, Command::Back),
            (intent.go_forward, Command::Forward),
            (intent.reload, Command::Reload),
            (intent.home, Command::Home),
            (intent.stop, Command::Stop),
            (intent.show_history, Command::ShowHistory),
        ];
        let mut out: Vec<Command> = table
            .into_iter()
            .filter_map(|(hit, cmd)| hit.then_some(cmd))
            .collect();
        if let Some(text) = &intent.navigate_to {
            out.push(Command::Navigate(text.clone()));
        }
        out
    }

    pub fn from_menu(intent: &MenuIntent, input: BrowserInput) -> Vec<Command> {
        let table = [
            (intent.open_file, Command::OpenFile),
            (intent.save_page, Command::SavePage),
            (intent.print, Command::Print),
            // the menu has no query prompt; it searches for ""
            (intent.find, Command::Find(String::new())),
            (
                intent.toggle_fullscreen || input.fullscreen_pressed,
                Command::ToggleFullscreen,
            ),
        ];
        table
            .into_iter()
            .filter_map(|(hit, cmd)| hit.then_some(cmd))
            .collect()
    }
}
