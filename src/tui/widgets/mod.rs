//! Reusable widgets for the TUI
//!
//! Contains custom widgets for common UI elements

pub mod input;
pub mod swipe;
pub mod transaction_item;

pub use input::TextInput;
pub use swipe::{RowAction, SwipeConfig, SwipePhase, SwipeRow, TapOutcome};
pub use transaction_item::{item_appearance, item_line, ItemAppearance, ItemFormat};
