//! Balance CLI command
//!
//! Prints the consolidated and invested balances for a period or for all
//! time.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_consolidation;
use crate::error::SaldoResult;
use crate::services::{BalanceScope, BalanceService, PeriodService};
use crate::storage::Storage;

/// Arguments for `saldo balance`
#[derive(Args, Debug, Default)]
pub struct BalanceArgs {
    /// Period: daily, weekly, monthly or yearly
    #[arg(short, long)]
    pub period: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Count every transaction regardless of date
    #[arg(short, long, conflicts_with_all = ["period", "from", "to"])]
    pub all_time: bool,

    /// List documents that were skipped
    #[arg(short, long)]
    pub verbose: bool,
}

impl BalanceArgs {
    fn names_a_period(&self) -> bool {
        self.period.is_some() || self.from.is_some() || self.to.is_some()
    }
}

/// Pick the scope for the command
///
/// An explicit period or date bound always narrows the balance; otherwise
/// the configured default applies.
pub fn resolve_scope(settings: &Settings, args: &BalanceArgs) -> SaldoResult<BalanceScope> {
    if args.all_time {
        return Ok(BalanceScope::AllTime);
    }

    let periods = PeriodService::new(settings);
    let filter = periods.filter_from_args(
        args.period.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
    )?;
    let range = periods.current_range(&filter);

    if args.names_a_period() {
        Ok(BalanceScope::Within(range))
    } else {
        Ok(BalanceScope::from_setting(settings.balance_scope, &range))
    }
}

/// Handle the balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    args: BalanceArgs,
) -> SaldoResult<()> {
    let scope = resolve_scope(settings, &args)?;
    let consolidation = BalanceService::new(storage, settings).consolidate(&scope)?;

    print!(
        "{}",
        format_consolidation(
            &consolidation,
            &scope.label(),
            &settings.currency_symbol,
            args.verbose
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::BalanceScopeSetting;
    use crate::models::PeriodKind;

    #[test]
    fn test_default_scope_follows_settings() {
        let settings = Settings::default();
        let scope = resolve_scope(&settings, &BalanceArgs::default()).unwrap();
        assert_eq!(scope, BalanceScope::AllTime);

        let settings = Settings {
            balance_scope: BalanceScopeSetting::Period,
            default_period: PeriodKind::Monthly,
            ..Settings::default()
        };
        let scope = resolve_scope(&settings, &BalanceArgs::default()).unwrap();
        assert!(matches!(scope, BalanceScope::Within(_)));
    }

    #[test]
    fn test_explicit_range_narrows_scope() {
        let settings = Settings::default();
        let args = BalanceArgs {
            from: Some("2024-02-01".into()),
            to: Some("2024-02-29".into()),
            ..BalanceArgs::default()
        };
        match resolve_scope(&settings, &args).unwrap() {
            BalanceScope::Within(range) => {
                assert_eq!(range.start.to_string(), "2024-02-01");
                assert_eq!(range.end.to_string(), "2024-02-29");
            }
            other => panic!("expected a range, got {:?}", other),
        }
    }

    #[test]
    fn test_all_time_wins() {
        let settings = Settings {
            balance_scope: BalanceScopeSetting::Period,
            ..Settings::default()
        };
        let args = BalanceArgs {
            all_time: true,
            ..BalanceArgs::default()
        };
        assert_eq!(resolve_scope(&settings, &args).unwrap(), BalanceScope::AllTime);
    }

    #[test]
    fn test_bad_period_is_rejected() {
        let settings = Settings::default();
        let args = BalanceArgs {
            period: Some("fortnightly".into()),
            ..BalanceArgs::default()
        };
        assert!(resolve_scope(&settings, &args).unwrap_err().is_validation());
    }
}
