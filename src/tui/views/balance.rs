//! Balance header view
//!
//! Shows the consolidated and invested balances for the current scope, and
//! warns when stored documents were left out.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Money;
use crate::tui::app::App;

fn balance_color(amount: Money) -> Color {
    if amount.is_negative() {
        Color::Red
    } else if amount.is_zero() {
        Color::White
    } else {
        Color::Green
    }
}

/// Render the balance header
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let totals = &app.consolidation;

    let block = Block::default()
        .title(" Saldo ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Balance: ", Style::default().fg(Color::White)),
            Span::styled(
                totals.consolidated_balance.format_with_symbol(symbol),
                Style::default()
                    .fg(balance_color(totals.consolidated_balance))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Invested: ", Style::default().fg(Color::White)),
            Span::styled(
                totals.invested_balance.format_with_symbol(symbol),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("({})", app.scope().label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Income settled: ", Style::default().fg(Color::Gray)),
            Span::styled(
                totals.income_consolidated.format_with_symbol(symbol),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled("Expenses paid: ", Style::default().fg(Color::Gray)),
            Span::styled(
                totals.expenses_paid.format_with_symbol(symbol),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];

    if totals.has_skipped() {
        lines.push(Line::from(Span::styled(
            format!(
                "{} stored record(s) could not be read and are not counted",
                totals.skipped.len()
            ),
            Style::default().fg(Color::Yellow),
        )));
    } else if totals.defaulted_amounts > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "{} record(s) have no amount and count as zero",
                totals.defaulted_amounts
            ),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
