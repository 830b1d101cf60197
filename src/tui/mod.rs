//! Back-office Terminal User Interface (TUI)
//!
//! One tab per resource screen. Requests run on background tasks and their
//! results come back to the UI loop as `AppEvent`s.

pub mod app;
pub mod components;
pub mod events;
pub mod ui;
pub mod view;

pub use app::App;
pub use events::AppEvent;
