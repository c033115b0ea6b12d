//! User settings for Saldo
//!
//! Manages user preferences including currency, the default period filter,
//! whether balances honor the period, and swipe gesture tuning.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::SaldoPaths;
use crate::error::SaldoError;
use crate::models::period::PeriodKind;

/// Which records the balance totals cover by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BalanceScopeSetting {
    /// Every parseable record, regardless of the selected period
    #[default]
    AllTime,
    /// Only records dated inside the selected period
    Period,
}

/// Swipeable row tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeSettings {
    /// Offset of an open row (width of the action buttons)
    #[serde(default = "default_reveal_width")]
    pub reveal_width: f32,

    /// Leftward travel needed on release to open a row
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Gesture units covered by one terminal column of mouse drag
    #[serde(default = "default_units_per_column")]
    pub units_per_column: f32,

    /// Offset change per animation tick
    #[serde(default = "default_animation_step")]
    pub animation_step: f32,
}

fn default_reveal_width() -> f32 {
    120.0
}

fn default_threshold() -> f32 {
    50.0
}

fn default_units_per_column() -> f32 {
    10.0
}

fn default_animation_step() -> f32 {
    40.0
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            reveal_width: default_reveal_width(),
            threshold: default_threshold(),
            units_per_column: default_units_per_column(),
            animation_step: default_animation_step(),
        }
    }
}

/// User settings for Saldo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,

    /// Period filter selected when the app starts
    #[serde(default)]
    pub default_period: PeriodKind,

    /// Whether balances cover all time or only the selected period
    #[serde(default)]
    pub balance_scope: BalanceScopeSetting,

    /// Swipe gesture tuning
    #[serde(default)]
    pub swipe: SwipeSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_first_day_of_week() -> u8 {
    0 // Sunday
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            first_day_of_week: default_first_day_of_week(),
            default_period: PeriodKind::default(),
            balance_scope: BalanceScopeSetting::default(),
            swipe: SwipeSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SaldoPaths) -> Result<Self, SaldoError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SaldoError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SaldoError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if !is_valid_date_format(&settings.date_format) {
                return Err(SaldoError::Config(format!(
                    "Invalid date_format {:?} in settings file",
                    settings.date_format
                )));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SaldoPaths) -> Result<(), SaldoError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SaldoError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SaldoError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

/// Whether chrono can render dates with this strftime string
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
