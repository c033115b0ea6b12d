//! Configuration module for Saldo
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Swipe gesture and balance preferences

pub mod paths;
pub mod settings;

pub use paths::SaldoPaths;
pub use settings::{BalanceScopeSetting, Settings, SwipeSettings};
