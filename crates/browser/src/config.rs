pub const APP_NAME: &str = "Simple Web Browser";
pub const DEFAULT_START_URL: &str = "https://www.google.com";
pub const DEFAULT_HOME_URL: &str = "https://www.google.com";

pub const HOME_ENV: &str = "SIMPLEBROWSER_HOME";
pub const START_ENV: &str = "SIMPLEBROWSER_START";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub app_name: String,
    /// Loaded when the window opens.
    pub start_url: String,
    /// Target of the Home button.
    pub home_url: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            start_url: DEFAULT_START_URL.to_string(),
            home_url: DEFAULT_HOME_URL.to_string(),
            window_width: 1024,
            window_height: 768,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        if let Some(home) = pick(HOME_ENV) {
            log::info!("home url from {HOME_ENV}: {home}");
            self.home_url = home;
        }
        if let Some(start) = pick(START_ENV) {
            log::info!("start url from {START_ENV}: {start}");
            self.start_url = start;
        }
        self
    }
}
