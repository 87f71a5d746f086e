pub mod menu;
pub mod status;
pub mod toolbar;

pub use menu::{MenuIntent, menu_bar};
pub use status::status_bar;
pub use toolbar::{NavigationIntent, NavigationWidgetsConfig, top_bar};
