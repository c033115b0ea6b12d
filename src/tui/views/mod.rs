//! TUI Views module
//!
//! The balance header, the transaction list and the status bar.

pub mod balance;
pub mod status_bar;
pub mod transactions;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    balance::render(frame, app, layout.header);
    transactions::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog.clone() {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::render(frame, app);
        }
        ActiveDialog::ConfirmDelete(id) => {
            let detail = app
                .records
                .iter()
                .find(|r| r.id == id)
                .map(|r| {
                    format!(
                        "{} ({})",
                        r.title,
                        r.amount.format_with_symbol(&app.settings.currency_symbol)
                    )
                });
            dialogs::confirm::render(frame, "Delete this transaction?", detail.as_deref());
        }
        ActiveDialog::None => {}
    }
}
