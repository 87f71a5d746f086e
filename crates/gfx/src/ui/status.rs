use egui::{Color32, Context, RichText, TopBottomPanel};

/// Bottom status line. A hovered status tip wins over the notice, the way
/// desktop toolkits show action tips.
pub fn status_bar(ctx: &Context, tip: Option<&str>, notice: Option<(&str, bool)>) {
    TopBottomPanel::bottom("browser_statusbar").show(ctx, |ui| {
        ui.horizontal(|ui| match (tip, notice) {
            (Some(tip), _) => {
                ui.label(tip);
            }
            (None, Some((message, true))) => {
                ui.label(RichText::new(message).color(Color32::LIGHT_RED));
            }
            (None, Some((message, false))) => {
                ui.label(message);
            }
            (None, None) => {
                ui.label("");
            }
        });
    });
}
