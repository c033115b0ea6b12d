//! Balance report formatting

use crate::models::Money;
use crate::services::Consolidation;

const WIDTH: usize = 44;

fn separator() -> String {
    "─".repeat(WIDTH)
}

fn money_line(label: &str, amount: Money, symbol: &str) -> String {
    format!(
        "{:<26}{:>18}\n",
        label,
        amount.format_with_symbol(symbol)
    )
}

/// Format the totals of a consolidation
///
/// With `verbose`, every skipped document is listed with its reason.
pub fn format_consolidation(
    consolidation: &Consolidation,
    scope_label: &str,
    symbol: &str,
    verbose: bool,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Balance: {}\n", scope_label));
    output.push_str(&separator());
    output.push('\n');
    output.push_str(&money_line(
        "Income consolidated",
        consolidation.income_consolidated,
        symbol,
    ));
    output.push_str(&money_line("Expenses paid", consolidation.expenses_paid, symbol));
    output.push_str(&separator());
    output.push('\n');
    output.push_str(&money_line(
        "Consolidated balance",
        consolidation.consolidated_balance,
        symbol,
    ));
    output.push_str(&money_line(
        "Invested balance",
        consolidation.invested_balance,
        symbol,
    ));
    output.push('\n');

    output.push_str(&format!(
        "{} transaction(s) in scope, {} outside\n",
        consolidation.in_scope, consolidation.out_of_range
    ));

    if consolidation.defaulted_amounts > 0 {
        output.push_str(&format!(
            "{} transaction(s) had no amount and counted as zero\n",
            consolidation.defaulted_amounts
        ));
    }

    if consolidation.has_skipped() {
        output.push_str(&format!(
            "{} document(s) skipped",
            consolidation.skipped.len()
        ));
        if verbose {
            output.push_str(":\n");
            for skipped in &consolidation.skipped {
                output.push_str(&format!("  {}\n", skipped));
            }
        } else {
            output.push_str(" (use --verbose to list them)\n");
        }
    }

    output
}
