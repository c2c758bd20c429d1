//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions that turn a period's shifts and
//! sales into a pay statement: period windowing, effective hours, the sales
//! bonus, tiered income tax, statement assembly, and the team summary built
//! on top of individual statements.

mod effective_hours;
mod income_tax;
mod period_totals;
mod rates;
mod sales_bonus;
mod statement;
mod team_summary;

pub use effective_hours::{EffectiveHoursResult, calculate_effective_hours, effective_hours};
pub use income_tax::{
    IncomeTaxResult, TAX_BRACKETS_2025, TaxBracket, bracket_lines, bracket_tax,
    calculate_income_tax, income_tax,
};
pub use period_totals::{PeriodTotals, calculate_period_totals};
pub use rates::{
    BONUS_THRESHOLD_PER_HOUR, EFFECTIVE_HOURS_MULTIPLIER, PENSION_RATE, UNION_RATE, VACATION_RATE,
};
pub use sales_bonus::{SalesBonusResult, bonus_threshold, calculate_sales_bonus, sales_bonus};
pub use statement::compute_statement;
pub use team_summary::{AgentStatement, AgentSummaryRow, TeamSummary, summarize_team};
