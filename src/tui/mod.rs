//! Terminal User Interface module
//!
//! A single-screen TUI built on ratatui: balance totals for the selected
//! period on top, the transaction list below with swipeable rows, and dialogs
//! for adding, editing and deleting transactions.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub mod keybindings;

pub use app::App;
pub use terminal::run_tui;
