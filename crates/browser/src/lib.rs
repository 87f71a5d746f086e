//! Browser chrome: toolbar, menus, URL field and the command dispatch that
//! binds them to an injected `RenderSurface`.

pub mod commands;
pub mod config;
pub mod files;
pub mod history;
pub mod nav;
pub mod notice;
mod shell;

pub use commands::Command;
pub use config::ShellConfig;
pub use files::{FileDialogs, FileError, NativeDialogs};
pub use notice::{Notice, NoticeLevel};
pub use shell::ShellApp;
