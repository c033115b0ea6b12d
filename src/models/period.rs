//! Period filters and the date ranges they resolve to
//!
//! A [`PeriodFilter`] plus a reference date resolves to a [`DateRange`]: an
//! inclusive start/end pair with a label for headers and status lines.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar-relative period kinds (everything except custom ranges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl PeriodKind {
    /// Next kind in the daily → weekly → monthly → yearly cycle
    pub fn cycle(self) -> Self {
        match self {
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Monthly,
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Daily,
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "y" => Ok(Self::Yearly),
            other => Err(format!(
                "Unknown period '{}'. Use daily, weekly, monthly or yearly",
                other
            )),
        }
    }
}

/// Period selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeriodFilter {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl From<PeriodKind> for PeriodFilter {
    fn from(kind: PeriodKind) -> Self {
        match kind {
            PeriodKind::Daily => Self::Daily,
            PeriodKind::Weekly => Self::Weekly,
            PeriodKind::Monthly => Self::Monthly,
            PeriodKind::Yearly => Self::Yearly,
        }
    }
}

impl PeriodFilter {
    /// The calendar kind, or `None` for custom ranges
    pub fn kind(&self) -> Option<PeriodKind> {
        match self {
            Self::Daily => Some(PeriodKind::Daily),
            Self::Weekly => Some(PeriodKind::Weekly),
            Self::Monthly => Some(PeriodKind::Monthly),
            Self::Yearly => Some(PeriodKind::Yearly),
            Self::Custom { .. } => None,
        }
    }

    /// Resolve the range containing `anchor`
    ///
    /// `first_day_of_week` follows the settings convention (0 = Sunday,
    /// 1 = Monday, ...). Custom ranges ignore the anchor.
    pub fn resolve(&self, anchor: NaiveDate, first_day_of_week: u8) -> DateRange {
        match *self {
            Self::Daily => DateRange::with_label(
                anchor,
                anchor,
                anchor.format("%a %d %b %Y").to_string(),
            ),
            Self::Weekly => {
                let offset = (anchor.weekday().num_days_from_sunday() + 7
                    - u32::from(first_day_of_week % 7))
                    % 7;
                let start = anchor - Days::new(u64::from(offset));
                let end = start + Days::new(6);
                let label = if start.year() == end.year() {
                    format!("{} - {}", start.format("%d %b"), end.format("%d %b %Y"))
                } else {
                    format!("{} - {}", start.format("%d %b %Y"), end.format("%d %b %Y"))
                };
                DateRange::with_label(start, end, label)
            }
            Self::Monthly => {
                let start = anchor.with_day(1).unwrap_or(anchor);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(anchor);
                DateRange::with_label(start, end, start.format("%B %Y").to_string())
            }
            Self::Yearly => {
                let year = anchor.year();
                let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(anchor);
                let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(anchor);
                DateRange::with_label(start, end, year.to_string())
            }
            Self::Custom { start, end } => DateRange::new(start, end),
        }
    }

    /// Move an anchor date by one period in either direction
    pub fn shift(&self, anchor: NaiveDate, forward: bool) -> NaiveDate {
        let shifted = match (self, forward) {
            (Self::Daily, true) => anchor.checked_add_days(Days::new(1)),
            (Self::Daily, false) => anchor.checked_sub_days(Days::new(1)),
            (Self::Weekly, true) => anchor.checked_add_days(Days::new(7)),
            (Self::Weekly, false) => anchor.checked_sub_days(Days::new(7)),
            (Self::Monthly, true) => anchor.checked_add_months(Months::new(1)),
            (Self::Monthly, false) => anchor.checked_sub_months(Months::new(1)),
            (Self::Yearly, true) => anchor.checked_add_months(Months::new(12)),
            (Self::Yearly, false) => anchor.checked_sub_months(Months::new(12)),
            (Self::Custom { .. }, _) => None,
        };
        shifted.unwrap_or(anchor)
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{}", kind),
            None => write!(f, "Custom"),
        }
    }
}

/// Inclusive date range with a human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub display_text: String,
}

impl DateRange {
    /// Build a range labelled "start to end"; reversed bounds are swapped
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let label = format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
        Self::with_label(start, end, label)
    }

    fn with_label(start: NaiveDate, end: NaiveDate, display_text: String) -> Self {
        Self {
            start,
            end,
            display_text,
        }
    }

    /// Check if a date falls within this range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text)
    }
}
