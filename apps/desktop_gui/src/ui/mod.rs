//! UI layer for desktop GUI: app shell, phone frame, widgets and theme.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::DesktopGuiApp;
