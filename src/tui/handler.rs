//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to the appropriate handlers
//! based on the current application state. Mouse drags on a list row drive
//! that row's swipe state machine.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::{ActiveDialog, App, DragState};
use super::event::Event;
use super::widgets::swipe::{action_at, RowAction, TapOutcome};

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Tick => {
            app.tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    handle_normal_key(app, key)
}

/// Handle keys on the transaction list
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let row_open = app.selected_swipe().is_some_and(|row| row.is_open());

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        // Period and scope
        KeyCode::Char('p') => app.cycle_period(),
        KeyCode::Char('[') => app.shift_period(false),
        KeyCode::Char(']') => app.shift_period(true),
        KeyCode::Char('s') => app.toggle_scope(),
        KeyCode::Char('r') => match app.reload() {
            Ok(()) => app.set_status("Reloaded"),
            Err(e) => app.set_status(format!("Error: {}", e)),
        },

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select(0),
        KeyCode::Char('G') | KeyCode::End => {
            app.select(app.records.len().saturating_sub(1));
        }

        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddTransaction),

        // Swipe
        KeyCode::Char('h') | KeyCode::Left => app.open_selected(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Esc | KeyCode::Enter => {
            app.tap_selected();
        }
        KeyCode::Char('e') if row_open => {
            app.activate_row(app.selected_index, RowAction::Edit);
        }
        KeyCode::Char('d') if row_open => {
            app.activate_row(app.selected_index, RowAction::Delete);
        }
        KeyCode::Char('e') | KeyCode::Char('d') => {
            app.set_status("Swipe the row open first (h or ←)");
        }

        _ => {}
    }

    Ok(())
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog.clone() {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            super::dialogs::transaction::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
    Ok(())
}

/// Row index under a screen position
fn row_at(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.list_area;
    if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
        return None;
    }
    let idx = app.scroll_offset + (row - area.y) as usize;
    (idx < app.records.len()).then_some(idx)
}

/// Button under a column of an open row
fn button_at(app: &App, row: usize, column: u16) -> Option<RowAction> {
    let swipe = app.swipe_rows.get(row).filter(|s| s.is_open())?;
    let area = app.list_area;
    let full = swipe
        .full_columns(app.settings.swipe.units_per_column)
        .min(area.width);
    let strip_start = area.right().saturating_sub(full);
    if column < strip_start {
        return None;
    }
    action_at(column - strip_start, full)
}

fn translation(app: &App, start_column: u16, column: u16) -> f32 {
    (f32::from(column) - f32::from(start_column)) * app.settings.swipe.units_per_column
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.has_dialog() {
        return Ok(());
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.drag = row_at(app, mouse.column, mouse.row).map(|row| DragState {
                row,
                start_column: mouse.column,
                moved: false,
            });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(mut drag) = app.drag else {
                return Ok(());
            };
            if mouse.column != drag.start_column && !drag.moved {
                drag.moved = true;
                if drag.row != app.selected_index {
                    app.select(drag.row);
                }
            }
            app.drag = Some(drag);

            if drag.moved {
                let tx = translation(app, drag.start_column, mouse.column);
                if let Some(row) = app.swipe_rows.get_mut(drag.row) {
                    row.drag_changed(tx);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(drag) = app.drag.take() else {
                return Ok(());
            };
            if drag.moved {
                let tx = translation(app, drag.start_column, mouse.column);
                if let Some(row) = app.swipe_rows.get_mut(drag.row) {
                    row.drag_ended(tx);
                }
            } else {
                handle_click(app, drag.row, mouse.column);
            }
        }
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::ScrollUp => app.move_up(),
        _ => {}
    }

    Ok(())
}

/// A press and release without movement
fn handle_click(app: &mut App, row: usize, column: u16) {
    if let Some(action) = button_at(app, row, column) {
        app.activate_row(row, action);
        return;
    }

    let outcome = app.swipe_rows.get_mut(row).map(|swipe| swipe.tap());
    if outcome == Some(TapOutcome::PassThrough) {
        app.select(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SaldoPaths;
    use crate::config::settings::Settings;
    use crate::models::{Money, TransactionKind, TransactionRecord, TransactionStatus};
    use crate::services::PeriodService;
    use crate::storage::Storage;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    fn setup(rows: usize) -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SaldoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let settings = Settings::default();
        let today = PeriodService::new(&settings).today();
        for i in 0..rows {
            let record = TransactionRecord::new(
                TransactionKind::Expense,
                TransactionStatus::Paid,
                Money::from_cents(100 * (i as i64 + 1)),
                today,
                format!("row {}", i),
            );
            storage.documents.upsert(&record).unwrap();
        }
        (temp_dir, storage, settings)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn settle(app: &mut App) {
        for _ in 0..10 {
            handle_event(app, Event::Tick).unwrap();
        }
    }

    #[test]
    fn test_keyboard_swipe_and_edit() {
        let (_temp_dir, storage, settings) = setup(1);
        let mut app = App::new(&storage, &settings);

        handle_event(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert!(!app.has_dialog());

        handle_event(&mut app, key(KeyCode::Left)).unwrap();
        settle(&mut app);
        assert!(app.swipe_rows[0].is_open());
        assert_eq!(app.swipe_rows[0].offset(), -120.0);

        handle_event(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert!(matches!(app.active_dialog, ActiveDialog::EditTransaction(_)));

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_escape_closes_open_row() {
        let (_temp_dir, storage, settings) = setup(1);
        let mut app = App::new(&storage, &settings);

        handle_event(&mut app, key(KeyCode::Char('h'))).unwrap();
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        settle(&mut app);
        assert!(!app.swipe_rows[0].is_open());
        assert_eq!(app.swipe_rows[0].offset(), 0.0);
    }

    #[test]
    fn test_mouse_drag_opens_row() {
        let (_temp_dir, storage, settings) = setup(2);
        let mut app = App::new(&storage, &settings);
        app.list_area = Rect::new(1, 6, 60, 10);

        handle_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 40, 7)).unwrap();
        handle_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 34, 7)).unwrap();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.swipe_rows[1].offset(), -60.0);

        handle_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 34, 7)).unwrap();
        settle(&mut app);
        assert!(app.swipe_rows[1].is_open());
        assert_eq!(app.swipe_rows[1].offset(), -120.0);
    }

    #[test]
    fn test_short_mouse_drag_snaps_back() {
        let (_temp_dir, storage, settings) = setup(1);
        let mut app = App::new(&storage, &settings);
        app.list_area = Rect::new(1, 6, 60, 10);

        handle_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 40, 6)).unwrap();
        handle_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 37, 6)).unwrap();
        handle_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 37, 6)).unwrap();
        settle(&mut app);
        assert!(!app.swipe_rows[0].is_open());
        assert_eq!(app.swipe_rows[0].offset(), 0.0);
    }

    #[test]
    fn test_click_on_revealed_delete_button() {
        let (_temp_dir, storage, settings) = setup(1);
        let mut app = App::new(&storage, &settings);
        app.list_area = Rect::new(1, 6, 60, 10);
        app.open_selected();
        settle(&mut app);

        // Strip spans columns 49..61; Delete is the right half
        handle_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 58, 6)).unwrap();
        handle_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 58, 6)).unwrap();
        assert!(matches!(app.active_dialog, ActiveDialog::ConfirmDelete(_)));

        handle_event(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.records.is_empty());
    }

    #[test]
    fn test_click_on_open_row_content_closes_it() {
        let (_temp_dir, storage, settings) = setup(1);
        let mut app = App::new(&storage, &settings);
        app.list_area = Rect::new(1, 6, 60, 10);
        app.open_selected();
        settle(&mut app);

        handle_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 10, 6)).unwrap();
        handle_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 10, 6)).unwrap();
        assert!(!app.swipe_rows[0].is_open());
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_period_keys() {
        let (_temp_dir, storage, settings) = setup(1);
        let mut app = App::new(&storage, &settings);
        let start = app.range.start;

        handle_event(&mut app, key(KeyCode::Char('['))).unwrap();
        assert!(app.range.start < start);
        assert!(app.records.is_empty());

        handle_event(&mut app, key(KeyCode::Char(']'))).unwrap();
        assert_eq!(app.range.start, start);
        assert_eq!(app.records.len(), 1);
    }
}
