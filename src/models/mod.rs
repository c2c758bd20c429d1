//! Core data models for the payroll engine.
//!
//! This module contains the records the engine consumes (shifts, sales, wage
//! settings, pay periods) and the statement it produces.

mod pay_period;
mod pay_statement;
mod sale;
mod shift;
mod wage_settings;

pub use pay_period::{DEFAULT_HISTORY_LENGTH, PERIOD_END_DAY, PERIOD_START_DAY, PayPeriod};
pub use pay_statement::{
    AuditStep, AuditTrace, AuditWarning, IncomeTaxBreakdown, PayStatement, SaleTotals,
    SalesBreakdown, TaxBracketLine,
};
pub use sale::{MAX_SALE_AMOUNT, Sale, SaleType};
pub use shift::{MAX_SHIFT_HOURS, Shift};
pub use wage_settings::{
    DEFAULT_ALLOWANCE_USAGE, DEFAULT_DAY_RATE, DEFAULT_EVENING_RATE, DEFAULT_PERSONAL_ALLOWANCE,
    MAX_HOURLY_RATE, MAX_PERSONAL_ALLOWANCE, WageSettings, WageSettingsOverride,
};
