//! Transaction entry/edit dialog
//!
//! Modal dialog for adding or editing transactions with form fields,
//! tab navigation, validation, and save/cancel functionality.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::record::{parse_document_date, DOCUMENT_DATE_FORMAT};
use crate::models::{Money, TransactionKind, TransactionRecord, TransactionStatus};
use crate::services::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

const LABEL_WIDTH: usize = 11;

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Title,
    Amount,
    Date,
    Kind,
    Status,
    Category,
    Description,
}

impl TransactionField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Kind,
            Self::Kind => Self::Status,
            Self::Status => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Title,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Amount => Self::Title,
            Self::Date => Self::Amount,
            Self::Kind => Self::Date,
            Self::Status => Self::Kind,
            Self::Category => Self::Status,
            Self::Description => Self::Category,
        }
    }

    /// Fields picked from a fixed set rather than typed
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Kind | Self::Status)
    }
}

/// Statuses offered for a kind, in cycling order
pub fn status_choices(kind: TransactionKind) -> Vec<TransactionStatus> {
    match kind {
        TransactionKind::Income => vec![
            TransactionStatus::Pending,
            TransactionStatus::Received,
            TransactionStatus::Consolidated,
        ],
        TransactionKind::Expense | TransactionKind::Investment => {
            vec![TransactionStatus::Pending, TransactionStatus::Paid]
        }
    }
}

/// Values read back from a valid form
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub category: String,
    pub description: String,
}

impl From<FormValues> for CreateTransactionInput {
    fn from(values: FormValues) -> Self {
        Self {
            kind: values.kind,
            amount: values.amount,
            date: values.date,
            status: Some(values.status),
            title: Some(values.title),
            category: Some(values.category),
            description: Some(values.description),
        }
    }
}

impl From<FormValues> for UpdateTransactionInput {
    fn from(values: FormValues) -> Self {
        Self {
            kind: Some(values.kind),
            amount: Some(values.amount),
            date: Some(values.date),
            status: Some(values.status),
            title: Some(values.title),
            category: Some(values.category),
            description: Some(values.description),
        }
    }
}

/// State for the transaction form dialog
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub title_input: TextInput,
    pub amount_input: TextInput,
    pub date_input: TextInput,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub category_input: TextInput,
    pub description_input: TextInput,
    /// Whether this is an edit (vs new transaction)
    pub is_edit: bool,
    pub error_message: Option<String>,
}

impl TransactionFormState {
    /// Empty form for a new expense dated `today`
    pub fn new(today: NaiveDate) -> Self {
        let mut state = Self {
            focused_field: TransactionField::Title,
            title_input: TextInput::new().label("Title").placeholder("Sem título"),
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format(DOCUMENT_DATE_FORMAT).to_string()),
            kind: TransactionKind::Expense,
            status: TransactionStatus::Pending,
            category_input: TextInput::new().label("Category").placeholder("Optional"),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("Optional note"),
            is_edit: false,
            error_message: None,
        };
        state.update_focus();
        state
    }

    /// Form pre-populated from an existing record
    pub fn from_record(record: &TransactionRecord) -> Self {
        let mut state = Self::new(record.date);
        state.is_edit = true;
        state.title_input = state.title_input.content(&record.title);
        state.amount_input = state.amount_input.content(record.amount.to_string());
        state.kind = record.kind;
        state.status = record.status.clone();
        state.category_input = state.category_input.content(&record.category);
        state.description_input = state.description_input.content(&record.description);
        state.update_focus();
        state
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    /// Set focus to a specific field
    pub fn set_focus(&mut self, field: TransactionField) {
        self.focused_field = field;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        let focused = self.focused_field;
        self.title_input.focused = focused == TransactionField::Title;
        self.amount_input.focused = focused == TransactionField::Amount;
        self.date_input.focused = focused == TransactionField::Date;
        self.category_input.focused = focused == TransactionField::Category;
        self.description_input.focused = focused == TransactionField::Description;
    }

    /// The focused text input, if the focused field is typed
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Title => Some(&mut self.title_input),
            TransactionField::Amount => Some(&mut self.amount_input),
            TransactionField::Date => Some(&mut self.date_input),
            TransactionField::Category => Some(&mut self.category_input),
            TransactionField::Description => Some(&mut self.description_input),
            TransactionField::Kind | TransactionField::Status => None,
        }
    }

    /// Step the focused choice field
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focused_field {
            TransactionField::Kind => {
                let kinds = TransactionKind::all();
                let pos = kinds.iter().position(|k| *k == self.kind).unwrap_or(0);
                let next = step(pos, kinds.len(), forward);
                self.kind = kinds[next];
                if !status_choices(self.kind).contains(&self.status) {
                    self.status = TransactionStatus::Pending;
                }
            }
            TransactionField::Status => {
                let choices = status_choices(self.kind);
                self.status = match choices.iter().position(|s| *s == self.status) {
                    Some(pos) => choices[step(pos, choices.len(), forward)].clone(),
                    None => TransactionStatus::Pending,
                };
            }
            _ => {}
        }
    }

    /// Validate the form and read its values
    pub fn values(&self) -> Result<FormValues, String> {
        let date = parse_document_date(self.date_input.value().trim())
            .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())?;

        let amount_str = self.amount_input.value().trim();
        if amount_str.is_empty() {
            return Err("Enter an amount".to_string());
        }
        let amount = Money::parse(amount_str).map_err(|_| "Invalid amount".to_string())?;
        if amount.is_negative() {
            return Err("Amount cannot be negative".to_string());
        }

        Ok(FormValues {
            title: self.title_input.value().trim().to_string(),
            amount,
            date,
            kind: self.kind,
            status: self.status.clone(),
            category: self.category_input.value().trim().to_string(),
            description: self.description_input.value().trim().to_string(),
        })
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

fn step(pos: usize, len: usize, forward: bool) -> usize {
    if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(64, 14, frame.area());

    frame.render_widget(Clear, area);

    let title = match &app.active_dialog {
        ActiveDialog::EditTransaction(_) => " Edit Transaction ",
        _ => " Add Transaction ",
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Date
            Constraint::Length(1), // Kind
            Constraint::Length(1), // Status
            Constraint::Length(1), // Category
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.transaction_form;

    frame.render_widget(Paragraph::new(form.title_input.line(LABEL_WIDTH)), chunks[0]);
    frame.render_widget(Paragraph::new(form.amount_input.line(LABEL_WIDTH)), chunks[1]);
    frame.render_widget(Paragraph::new(form.date_input.line(LABEL_WIDTH)), chunks[2]);
    frame.render_widget(
        Paragraph::new(choice_line(
            "Type",
            &form.kind.to_string(),
            form.focused_field == TransactionField::Kind,
        )),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(choice_line(
            "Status",
            form.status.as_str(),
            form.focused_field == TransactionField::Status,
        )),
        chunks[4],
    );
    frame.render_widget(Paragraph::new(form.category_input.line(LABEL_WIDTH)), chunks[5]);
    frame.render_widget(
        Paragraph::new(form.description_input.line(LABEL_WIDTH)),
        chunks[6],
    );

    if let Some(ref error) = form.error_message {
        let error_line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[8]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Change  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[9]);
}

fn choice_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Yellow)
    };

    Line::from(vec![
        Span::styled(format!("{:>w$}: ", label, w = LABEL_WIDTH), label_style),
        Span::styled(format!("‹ {} ›", value), value_style),
    ])
}

/// Handle key input for the transaction dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.transaction_form;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
        }
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            if let Err(e) = save_transaction(app) {
                app.transaction_form.set_error(e);
            }
        }
        KeyCode::Left if form.focused_field.is_choice() => form.cycle_choice(false),
        KeyCode::Right | KeyCode::Char(' ') if form.focused_field.is_choice() => {
            form.cycle_choice(true)
        }
        KeyCode::Backspace => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.delete();
            }
        }
        KeyCode::Left => {
            if let Some(input) = form.focused_input() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = form.focused_input() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.move_start();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.move_end();
            }
        }
        KeyCode::Char(c) => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.insert(c);
            }
        }
        _ => return false,
    }

    true
}

/// Save the transaction
fn save_transaction(app: &mut App) -> Result<(), String> {
    let values = app.transaction_form.values()?;
    let service = TransactionService::new(app.storage);

    match app.active_dialog.clone() {
        ActiveDialog::EditTransaction(id) => {
            service
                .update(&id, values.into())
                .map_err(|e| e.to_string())?;
            app.transaction_saved("Transaction updated");
        }
        _ => {
            service.create(values.into()).map_err(|e| e.to_string())?;
            app.transaction_saved("Transaction created");
        }
    }

    Ok(())
}
