//! Transaction list item
//!
//! One line per transaction: a colored marker with a direction icon, the
//! title, the category, the amount and the date.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::models::{TransactionKind, TransactionRecord};

/// Colors and icon for a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAppearance {
    pub circle: Color,
    pub icon: &'static str,
    pub amount: Color,
}

/// Pick the marker for a transaction
///
/// Investments win over the income flag; everything else that is not
/// income is shown as money going out.
pub fn item_appearance(kind: TransactionKind, is_income: bool) -> ItemAppearance {
    let (color, icon) = if kind == TransactionKind::Investment {
        (Color::Blue, "↗")
    } else if is_income {
        (Color::Green, "▲")
    } else {
        (Color::Red, "▼")
    };

    ItemAppearance {
        circle: color,
        icon,
        amount: color,
    }
}

const MARKER_WIDTH: usize = 3;
const CATEGORY_WIDTH: usize = 14;
const AMOUNT_WIDTH: usize = 14;
const DATE_WIDTH: usize = 11;

/// Formatting inputs shared by every row
#[derive(Debug, Clone, Copy)]
pub struct ItemFormat<'a> {
    pub currency_symbol: &'a str,
    pub date_format: &'a str,
}

/// Build the line for a record, fitted to `width` columns
pub fn item_line(
    record: &TransactionRecord,
    format: ItemFormat<'_>,
    width: u16,
    selected: bool,
) -> Line<'static> {
    let appearance = item_appearance(record.kind, record.is_income());
    let width = width as usize;

    let amount = record.amount.format_with_symbol(format.currency_symbol);
    let date = record.date.format(format.date_format).to_string();

    let fixed = MARKER_WIDTH + CATEGORY_WIDTH + AMOUNT_WIDTH + DATE_WIDTH + 3;
    let title_width = width.saturating_sub(fixed).max(4);

    let base = if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", appearance.icon),
            Style::default()
                .fg(Color::Black)
                .bg(appearance.circle)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", base),
        Span::styled(
            fit(&record.title, title_width),
            base.fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", base),
        Span::styled(fit(&record.category, CATEGORY_WIDTH), base.fg(Color::Gray)),
        Span::styled(
            format!("{:>w$}", truncate(&amount, AMOUNT_WIDTH), w = AMOUNT_WIDTH),
            base.fg(appearance.amount),
        ),
        Span::styled(" ", base),
        Span::styled(
            format!("{:>w$}", truncate(&date, DATE_WIDTH), w = DATE_WIDTH),
            base.fg(Color::DarkGray),
        ),
    ];

    clip_line(spans, width)
}

/// Keep at most `width` columns of a span list
pub fn clip_line(spans: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let mut remaining = width;
    let mut clipped = Vec::with_capacity(spans.len());

    for span in spans {
        if remaining == 0 {
            break;
        }
        let len = span.content.chars().count();
        if len <= remaining {
            remaining -= len;
            clipped.push(span);
        } else {
            let text: String = span.content.chars().take(remaining).collect();
            clipped.push(Span::styled(text, span.style));
            remaining = 0;
        }
    }

    Line::from(clipped)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_len.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn fit(s: &str, width: usize) -> String {
    format!("{:<w$}", truncate(s, width), w = width)
}
