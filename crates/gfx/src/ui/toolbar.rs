use core_types::BrowserInput;
use egui::{
    Align, Button, Context, CornerRadius, Frame, Id, Margin, Response, Stroke, TextEdit,
    TopBottomPanel, Ui,
    text::{CCursor, CCursorRange},
    text_edit::TextEditState,
};

pub const URLBAR_ID: &str = "browser_urlbar";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub go_back: bool,
    pub go_forward: bool,
    pub reload: bool,
    pub home: bool,
    pub stop: bool,
    pub show_history: bool,
    pub navigate_to: Option<String>,
    pub hovered_tip: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct NavigationWidgetsConfig {
    pub height: f32,
}

impl Default for NavigationWidgetsConfig {
    fn default() -> Self {
        Self { height: 32.0 }
    }
}

pub fn top_bar(
    ctx: &Context,
    url: &mut String,
    reset_cursor: bool,
    input: BrowserInput,
) -> NavigationIntent {
    let mut intent = NavigationIntent::default();
    TopBottomPanel::top("browser_toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            intent = navigation_widgets_with_config(
                ui,
                url,
                reset_cursor,
                NavigationWidgetsConfig::default(),
                input,
            );
        });
    });
    intent
}

fn tool_button(
    ui: &mut Ui,
    label: &str,
    tip: &'static str,
    size: f32,
    hovered: &mut Option<&'static str>,
) -> bool {
    let resp = ui
        .add(Button::new(label).min_size([size, size].into()))
        .on_hover_text(tip);
    if resp.hovered() {
        *hovered = Some(tip);
    }
    resp.clicked()
}

pub fn navigation_widgets_with_config(
    ui: &mut Ui,
    url: &mut String,
    reset_cursor: bool,
    config: NavigationWidgetsConfig,
    input: BrowserInput,
) -> NavigationIntent {
    let mut intent = NavigationIntent::default();
    let h = config.height.max(1.0);
    let tip = &mut intent.hovered_tip;

    intent.go_back = tool_button(ui, "⬅", "Back to previous page", h, tip);
    intent.go_forward = tool_button(ui, "➡", "Forward to next page", h, tip);
    intent.reload = tool_button(ui, "🔄", "Reload page", h, tip);
    intent.home = tool_button(ui, "🏠", "Go home", h, tip);

    ui.add_space(6.0);

    // Stop and History sit right of the URL field; reserve their width first.
    let trailing = h * 2.0 + 70.0;
    let field_width = (ui.available_width() - trailing).max(80.0);
    let resp = url_field(ui, url, reset_cursor, field_width, h);

    if input.enter_pressed && resp.has_focus() {
        intent.navigate_to = Some(url.clone());
    }

    ui.add_space(6.0);
    intent.stop = tool_button(ui, "⏹", "Stop loading current page", h, tip);
    intent.show_history = tool_button(ui, "History", "Show history", h, tip);

    intent
}

fn url_field(ui: &mut Ui, url: &mut String, reset_cursor: bool, width: f32, h: f32) -> Response {
    let id = Id::new(URLBAR_ID);
    if reset_cursor {
        let mut state = TextEdit::load_state(ui.ctx(), id).unwrap_or_else(TextEditState::default);
        state
            .cursor
            .set_char_range(Some(CCursorRange::one(CCursor::new(0))));
        state.store(ui.ctx(), id);
    }

    Frame::new()
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.inactive.bg_stroke.color,
        ))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::symmetric(6, 4))
        .show(ui, |ui| {
            ui.add_sized(
                [width, h - 8.0],
                TextEdit::singleline(url)
                    .id(id)
                    .return_key(None)
                    .hint_text("Enter URL")
                    .vertical_align(Align::Center),
            )
        })
        .inner
}
