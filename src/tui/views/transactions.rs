//! Transaction list view
//!
//! One line per transaction in the selected period. A row that is swiped
//! open slides left and shows its Edit and Delete buttons.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::widgets::swipe::action_spans;
use crate::tui::widgets::transaction_item::{clip_line, item_line, ItemFormat};

/// Render the transaction list
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" {}: {} ", app.period, app.range.display_text);
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.list_area = inner;

    if app.records.is_empty() {
        let text = Paragraph::new("No transactions in this period. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, inner);
        return;
    }

    let visible = inner.height as usize;
    if visible == 0 {
        return;
    }
    if app.selected_index < app.scroll_offset {
        app.scroll_offset = app.selected_index;
    } else if app.selected_index >= app.scroll_offset + visible {
        app.scroll_offset = app.selected_index + 1 - visible;
    }

    let settings = app.settings;
    let format = ItemFormat {
        currency_symbol: &settings.currency_symbol,
        date_format: &settings.date_format,
    };
    let units = settings.swipe.units_per_column;

    for (line_no, idx) in (app.scroll_offset..app.records.len())
        .take(visible)
        .enumerate()
    {
        let record = &app.records[idx];
        let (revealed, full) = app
            .swipe_rows
            .get(idx)
            .map(|row| {
                let full = row.full_columns(units).min(inner.width);
                (row.revealed_columns(units).min(full), full)
            })
            .unwrap_or((0, 0));

        let content_width = inner.width.saturating_sub(revealed);
        let selected = idx == app.selected_index;
        let mut spans = item_line(record, format, content_width, selected).spans;
        spans.extend(action_spans(revealed, full));

        let row_area = Rect {
            x: inner.x,
            y: inner.y + line_no as u16,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(clip_line(spans, inner.width as usize)),
            row_area,
        );
    }
}
