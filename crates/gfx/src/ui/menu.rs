use egui::{Context, MenuBar, TopBottomPanel, Ui};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuIntent {
    pub open_file: bool,
    pub save_page: bool,
    pub print: bool,
    pub find: bool,
    pub toggle_fullscreen: bool,
    pub hovered_tip: Option<&'static str>,
}

/// File / Edit / View menus. `fullscreen` only drives the checkmark; the
/// caller decides what a toggle means.
pub fn menu_bar(ctx: &Context, fullscreen: bool) -> MenuIntent {
    let mut intent = MenuIntent::default();
    TopBottomPanel::top("browser_menubar").show(ctx, |ui| {
        MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                intent.open_file = entry(ui, "Open File", "Open from file", &mut intent.hovered_tip);
                intent.save_page = entry(
                    ui,
                    "Save Page",
                    "Save current page to file",
                    &mut intent.hovered_tip,
                );
                intent.print = entry(ui, "Print", "Print current page", &mut intent.hovered_tip);
            });
            ui.menu_button("Edit", |ui| {
                intent.find = entry(ui, "Find", "Find on page", &mut intent.hovered_tip);
            });
            ui.menu_button("View", |ui| {
                let mut checked = fullscreen;
                let resp = ui
                    .checkbox(&mut checked, "Toggle Fullscreen (F11)")
                    .on_hover_text("Toggle fullscreen mode");
                if resp.hovered() {
                    intent.hovered_tip = Some("Toggle fullscreen mode");
                }
                if resp.clicked() {
                    intent.toggle_fullscreen = true;
                    ui.close();
                }
            });
        });
    });
    intent
}

fn entry(ui: &mut Ui, label: &str, tip: &'static str, hovered: &mut Option<&'static str>) -> bool {
    let resp = ui.button(label).on_hover_text(tip);
    if resp.hovered() {
        *hovered = Some(tip);
    }
    if resp.clicked() {
        ui.close();
        return true;
    }
    false
}
