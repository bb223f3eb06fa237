//! UI layer: the form screen, its dialogs, and colors.

pub mod app;
pub mod theme;

pub use app::FormApp;
