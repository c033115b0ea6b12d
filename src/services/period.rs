//! Period service
//!
//! Resolves the period filters chosen on the command line or in the TUI into
//! concrete date ranges, using the user's week start.

use chrono::{Days, Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{SaldoError, SaldoResult};
use crate::models::{DateRange, PeriodFilter, PeriodKind};

/// Service for period and date-range resolution
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Today's date in local time
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// The period filter configured as default
    pub fn default_filter(&self) -> PeriodFilter {
        self.settings.default_period.into()
    }

    /// Resolve a filter around an anchor date
    pub fn range(&self, filter: &PeriodFilter, anchor: NaiveDate) -> DateRange {
        filter.resolve(anchor, self.settings.first_day_of_week)
    }

    /// Resolve a filter around today
    pub fn current_range(&self, filter: &PeriodFilter) -> DateRange {
        self.range(filter, self.today())
    }

    /// Parse a date argument
    ///
    /// Accepts `yyyy-MM-dd`, `today` and `yesterday`.
    pub fn parse_date(&self, s: &str) -> SaldoResult<NaiveDate> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "today" => return Ok(self.today()),
            "yesterday" => {
                return self
                    .today()
                    .checked_sub_days(Days::new(1))
                    .ok_or_else(|| SaldoError::Validation("Date out of range".into()))
            }
            _ => {}
        }

        crate::models::record::parse_document_date(trimmed).map_err(|_| {
            SaldoError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        })
    }

    /// Build a filter from command-line style arguments
    ///
    /// `from`/`to` produce a custom range (a missing bound defaults to today);
    /// otherwise `period` names a calendar kind; with neither, the configured
    /// default applies.
    pub fn filter_from_args(
        &self,
        period: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> SaldoResult<PeriodFilter> {
        if from.is_some() || to.is_some() {
            if period.is_some() {
                return Err(SaldoError::Validation(
                    "Use either --period or --from/--to, not both".into(),
                ));
            }
            let start = from.map(|s| self.parse_date(s)).transpose()?;
            let end = to.map(|s| self.parse_date(s)).transpose()?;
            let today = self.today();
            return Ok(PeriodFilter::Custom {
                start: start.unwrap_or(today),
                end: end.unwrap_or(today),
            });
        }

        match period {
            Some(p) => p
                .parse::<PeriodKind>()
                .map(PeriodFilter::from)
                .map_err(SaldoError::Validation),
            None => Ok(self.default_filter()),
        }
    }
}
