//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use chrono::NaiveDate;
use ratatui::layout::Rect;

use crate::config::settings::{BalanceScopeSetting, Settings};
use crate::error::SaldoResult;
use crate::models::{DateRange, PeriodFilter, RecordId, TransactionRecord};
use crate::services::{
    BalanceScope, BalanceService, Consolidation, PeriodService, TransactionFilter,
    TransactionService,
};
use crate::storage::Storage;

use super::dialogs::transaction::TransactionFormState;
use super::widgets::swipe::{RowAction, SwipeConfig, SwipeRow, TapOutcome};

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    AddTransaction,
    EditTransaction(RecordId),
    ConfirmDelete(RecordId),
}

/// Mouse drag in progress on a list row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub row: usize,
    pub start_column: u16,
    pub moved: bool,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Current input mode
    pub input_mode: InputMode,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Transactions in the selected period, newest first
    pub records: Vec<TransactionRecord>,

    /// Swipe state, one per entry in `records`
    pub swipe_rows: Vec<SwipeRow>,

    /// Selected row index
    pub selected_index: usize,

    /// First visible row
    pub scroll_offset: usize,

    /// Selected period filter
    pub period: PeriodFilter,

    /// Date the period is resolved around
    pub anchor: NaiveDate,

    /// Resolved range for the selected period
    pub range: DateRange,

    /// Whether the balance honors the selected period
    pub scope_setting: BalanceScopeSetting,

    /// Latest balance totals
    pub consolidation: Consolidation,

    /// Status message to display
    pub status_message: Option<String>,

    /// Transaction form state
    pub transaction_form: TransactionFormState,

    /// Where the list rows were last drawn, for mouse hit-testing
    pub list_area: Rect,

    /// Mouse drag in progress
    pub drag: Option<DragState>,
}

impl<'a> App<'a> {
    /// Create a new App instance and load the current period
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let periods = PeriodService::new(settings);
        let period = periods.default_filter();
        let anchor = periods.today();
        let range = periods.range(&period, anchor);

        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            records: Vec::new(),
            swipe_rows: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            period,
            anchor,
            range,
            scope_setting: settings.balance_scope,
            consolidation: Consolidation::default(),
            status_message: None,
            transaction_form: TransactionFormState::new(anchor),
            list_area: Rect::default(),
            drag: None,
        };

        if let Err(e) = app.reload() {
            app.set_status(format!("Failed to load transactions: {}", e));
        }
        app
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Scope the balance is currently computed over
    pub fn scope(&self) -> BalanceScope {
        BalanceScope::from_setting(self.scope_setting, &self.range)
    }

    fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig::from(&self.settings.swipe)
    }

    /// Re-read records and totals from storage
    ///
    /// Every row comes back closed.
    pub fn reload(&mut self) -> SaldoResult<()> {
        let periods = PeriodService::new(self.settings);
        self.range = periods.range(&self.period, self.anchor);

        let filter = TransactionFilter::new().range(self.range.clone());
        self.records = TransactionService::new(self.storage).list(&filter)?;
        self.swipe_rows = vec![SwipeRow::new(self.swipe_config()); self.records.len()];
        self.drag = None;

        self.consolidation =
            BalanceService::new(self.storage, self.settings).consolidate(&self.scope())?;

        if self.selected_index >= self.records.len() {
            self.selected_index = self.records.len().saturating_sub(1);
        }
        Ok(())
    }

    fn reload_or_report(&mut self) {
        if let Err(e) = self.reload() {
            tracing::warn!(error = %e, "reload failed");
            self.set_status(format!("Error: {}", e));
        }
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddTransaction => {
                let today = PeriodService::new(self.settings).today();
                self.transaction_form = TransactionFormState::new(today);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::EditTransaction(id) => {
                match TransactionService::new(self.storage).get(id) {
                    Ok(record) => {
                        self.transaction_form = TransactionFormState::from_record(&record);
                        self.input_mode = InputMode::Editing;
                    }
                    Err(e) => {
                        self.set_status(format!("Error: {}", e));
                        return;
                    }
                }
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.input_mode = InputMode::Normal;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn selected_record(&self) -> Option<&TransactionRecord> {
        self.records.get(self.selected_index)
    }

    pub fn selected_swipe(&self) -> Option<&SwipeRow> {
        self.swipe_rows.get(self.selected_index)
    }

    /// Close every row except `keep`
    fn close_other_rows(&mut self, keep: usize) {
        for (idx, row) in self.swipe_rows.iter_mut().enumerate() {
            if idx != keep && row.is_open() {
                row.close();
            }
        }
    }

    /// Move selection to a row, closing any open row
    pub fn select(&mut self, index: usize) {
        if index < self.records.len() {
            self.close_other_rows(usize::MAX);
            self.selected_index = index;
        }
    }

    pub fn move_up(&mut self) {
        self.select(self.selected_index.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.selected_index + 1);
    }

    /// Swipe the selected row open
    pub fn open_selected(&mut self) {
        let idx = self.selected_index;
        self.close_other_rows(idx);
        if let Some(row) = self.swipe_rows.get_mut(idx) {
            row.open();
        }
    }

    /// Tap the selected row; returns true if it was open
    pub fn tap_selected(&mut self) -> bool {
        self.swipe_rows
            .get_mut(self.selected_index)
            .map(|row| row.tap() == TapOutcome::Closed)
            .unwrap_or(false)
    }

    /// Press a revealed button on a row
    ///
    /// Does nothing unless the row is open. The row is reset once the action
    /// has been routed.
    pub fn activate_row(&mut self, index: usize, action: RowAction) {
        let Some(action) = self.swipe_rows.get(index).and_then(|row| row.activate(action)) else {
            return;
        };
        let Some(id) = self.records.get(index).map(|r| r.id.clone()) else {
            return;
        };

        if let Some(row) = self.swipe_rows.get_mut(index) {
            row.reset();
        }

        match action {
            RowAction::Edit => self.open_dialog(ActiveDialog::EditTransaction(id)),
            RowAction::Delete => self.open_dialog(ActiveDialog::ConfirmDelete(id)),
        }
    }

    /// Delete after confirmation
    pub fn confirm_delete(&mut self) {
        let ActiveDialog::ConfirmDelete(id) = self.active_dialog.clone() else {
            return;
        };
        self.close_dialog();

        match TransactionService::new(self.storage).delete(&id) {
            Ok(()) => {
                self.set_status("Transaction deleted");
                self.reload_or_report();
            }
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    /// Called after the form saved a transaction
    pub fn transaction_saved(&mut self, message: &str) {
        self.close_dialog();
        self.set_status(message);
        self.reload_or_report();
    }

    /// Switch daily → weekly → monthly → yearly
    pub fn cycle_period(&mut self) {
        let next = match self.period.kind() {
            Some(kind) => kind.cycle(),
            None => self.settings.default_period,
        };
        self.period = next.into();
        self.reload_or_report();
    }

    /// Move the anchor one period back or forward
    pub fn shift_period(&mut self, forward: bool) {
        self.anchor = self.period.shift(self.anchor, forward);
        self.reload_or_report();
    }

    /// Toggle between all-time and in-period balances
    pub fn toggle_scope(&mut self) {
        self.scope_setting = match self.scope_setting {
            BalanceScopeSetting::AllTime => BalanceScopeSetting::Period,
            BalanceScopeSetting::Period => BalanceScopeSetting::AllTime,
        };
        self.reload_or_report();
    }

    /// Advance swipe animations
    pub fn tick(&mut self) {
        for row in &mut self.swipe_rows {
            row.tick();
        }
    }
}
