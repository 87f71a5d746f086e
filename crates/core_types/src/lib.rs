pub type RequestId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserInput {
    pub enter_pressed: bool,
    pub fullscreen_pressed: bool,
}

/// One visited location as reported by the web engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Rectangle in physical window pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Requests from the app to the native window; applied by the platform
/// after each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowRequest {
    Fullscreen(bool),
    Title(String),
}
