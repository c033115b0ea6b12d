//! Swipeable row state machine
//!
//! A row rests either closed (offset 0) or open (offset `-reveal_width`,
//! showing the Edit and Delete buttons on its trailing edge). Drags move the
//! offset directly; a release decides the resting state and [`SwipeRow::tick`]
//! animates toward it. Offsets are in abstract units; the view converts them
//! to terminal columns.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::config::settings::SwipeSettings;

/// Resting state of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipePhase {
    #[default]
    Closed,
    Open,
}

/// Action behind one of the revealed buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The row was open and is now closing
    Closed,
    /// The row was closed; the tap belongs to the row itself
    PassThrough,
}

/// Geometry and animation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub reveal_width: f32,
    pub threshold: f32,
    pub animation_step: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::from(&SwipeSettings::default())
    }
}

impl From<&SwipeSettings> for SwipeConfig {
    fn from(settings: &SwipeSettings) -> Self {
        Self {
            reveal_width: settings.reveal_width.abs(),
            threshold: settings.threshold.abs(),
            animation_step: settings.animation_step.abs().max(1.0),
        }
    }
}

/// Swipe state of a single row
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeRow {
    config: SwipeConfig,
    phase: SwipePhase,
    offset: f32,
    target: f32,
    dragging: bool,
}

impl Default for SwipeRow {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl SwipeRow {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            phase: SwipePhase::Closed,
            offset: 0.0,
            target: 0.0,
            dragging: false,
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == SwipePhase::Open
    }

    /// Current visible offset (0 or negative)
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset the row is animating toward
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the visible offset has not reached its resting place
    pub fn is_animating(&self) -> bool {
        !self.dragging && self.offset != self.target
    }

    fn resting_offset(&self, phase: SwipePhase) -> f32 {
        match phase {
            SwipePhase::Closed => 0.0,
            SwipePhase::Open => -self.config.reveal_width,
        }
    }

    /// Follow a drag in progress
    ///
    /// `translation_x` is measured from where the drag started. The row never
    /// moves right of its closed position.
    pub fn drag_changed(&mut self, translation_x: f32) {
        self.dragging = true;
        let base = self.resting_offset(self.phase);
        self.offset = (base + translation_x).min(0.0);
    }

    /// Finish a drag and pick the resting state
    pub fn drag_ended(&mut self, translation_x: f32) {
        self.dragging = false;
        self.phase = match self.phase {
            SwipePhase::Closed if translation_x < -self.config.threshold => SwipePhase::Open,
            SwipePhase::Open if translation_x > self.config.threshold => SwipePhase::Closed,
            phase => phase,
        };
        self.target = self.resting_offset(self.phase);
    }

    /// Advance the settle animation by one step
    ///
    /// Returns true while the offset is still moving.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }

        let step = self.config.animation_step;
        let delta = self.target - self.offset;
        if delta.abs() <= step {
            self.offset = self.target;
        } else {
            self.offset += step.copysign(delta);
        }
        self.is_animating()
    }

    /// Tap on the row
    pub fn tap(&mut self) -> TapOutcome {
        match self.phase {
            SwipePhase::Open => {
                self.close();
                TapOutcome::Closed
            }
            SwipePhase::Closed => TapOutcome::PassThrough,
        }
    }

    /// Press one of the revealed buttons
    ///
    /// Buttons only respond while the row is open. The row state is left
    /// untouched; the caller resets it once the action is handled.
    pub fn activate(&self, action: RowAction) -> Option<RowAction> {
        self.is_open().then_some(action)
    }

    /// Animate open
    pub fn open(&mut self) {
        self.dragging = false;
        self.phase = SwipePhase::Open;
        self.target = self.resting_offset(SwipePhase::Open);
    }

    /// Animate closed
    pub fn close(&mut self) {
        self.dragging = false;
        self.phase = SwipePhase::Closed;
        self.target = 0.0;
    }

    /// Snap closed without animating
    pub fn reset(&mut self) {
        self.dragging = false;
        self.phase = SwipePhase::Closed;
        self.offset = 0.0;
        self.target = 0.0;
    }

    /// Terminal columns currently revealed behind the row
    pub fn revealed_columns(&self, units_per_column: f32) -> u16 {
        let units = units_per_column.max(f32::EPSILON);
        let columns = (-self.offset / units).round();
        columns.clamp(0.0, u16::MAX as f32) as u16
    }

    /// Columns revealed once the row is fully open
    pub fn full_columns(&self, units_per_column: f32) -> u16 {
        let units = units_per_column.max(f32::EPSILON);
        (self.config.reveal_width / units).round().clamp(0.0, u16::MAX as f32) as u16
    }
}

/// Which button sits under a column inside the revealed strip
///
/// `column` counts from the left edge of the strip.
pub fn action_at(column: u16, strip_width: u16) -> Option<RowAction> {
    if column >= strip_width {
        return None;
    }
    if column < strip_width / 2 {
        Some(RowAction::Edit)
    } else {
        Some(RowAction::Delete)
    }
}

/// Spans for the revealed button strip
///
/// When the strip is narrower than the fully open width, the buttons are
/// clipped from the left, as if the row content were sliding over them.
pub fn action_spans(revealed: u16, full: u16) -> Vec<Span<'static>> {
    if revealed == 0 || full == 0 {
        return Vec::new();
    }

    let edit_width = (full / 2) as usize;
    let delete_width = full as usize - edit_width;
    let strip = format!(
        "{}{}",
        center_label("Edit", edit_width),
        center_label("Delete", delete_width)
    );

    let skip = full.saturating_sub(revealed) as usize;
    let visible: String = strip.chars().skip(skip).collect();
    let edit_visible = edit_width.saturating_sub(skip);

    let edit_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let delete_style = Style::default()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD);

    let edit: String = visible.chars().take(edit_visible).collect();
    let delete: String = visible.chars().skip(edit_visible).collect();

    let mut spans = Vec::with_capacity(2);
    if !edit.is_empty() {
        spans.push(Span::styled(edit, edit_style));
    }
    if !delete.is_empty() {
        spans.push(Span::styled(delete, delete_style));
    }
    spans
}

fn center_label(label: &str, width: usize) -> String {
    let label: String = label.chars().take(width).collect();
    let len = label.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
}
