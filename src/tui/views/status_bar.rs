//! Status bar view
//!
//! Shows the selected period, the balance scope, the latest status message
//! and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::settings::BalanceScopeSetting;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Period: ", Style::default().fg(Color::White)),
        Span::styled(app.period.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(" │ "),
        Span::styled(
            match app.scope_setting {
                BalanceScopeSetting::AllTime => "Balance: all time",
                BalanceScopeSetting::Period => "Balance: period",
            },
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} shown", app.records.len()),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = " q:Quit  ?:Help  a:Add  h:Swipe ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
