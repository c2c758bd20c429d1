//! Pay statement assembly.
//!
//! [`compute_statement`] is the engine's entry point. It sequences the period
//! filter, the bonus and the tax calculators into a fully itemized
//! [`PayStatement`].
//!
//! ## Order of operations
//!
//! 1. Filter shifts and sales to the period and total them
//! 2. Day and evening earnings from the resolved rates
//! 3. Effective hours, then the sales bonus over them
//! 4. Vacation pay (orlof) on wages plus bonus
//! 5. Pension and union dues on gross pay
//! 6. Income tax on gross pay less pension (union dues are not deducted first)
//! 7. Net pay = gross pay - (pension + union dues + tax)

use rust_decimal::Decimal;

use super::effective_hours::calculate_effective_hours;
use super::income_tax::calculate_income_tax;
use super::period_totals::calculate_period_totals;
use super::rates::{PENSION_RATE, UNION_RATE, VACATION_RATE};
use super::sales_bonus::calculate_sales_bonus;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, PayPeriod, PayStatement, Sale, Shift, WageSettings};

/// Computes the pay statement for the records that fall inside `period`.
///
/// Pure and order-independent: the same inputs always give the same
/// statement, whatever the order of `shifts` and `sales`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod)
/// when `period.start_date > period.end_date`, and
/// [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// when a figure is too large to represent.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_statement;
/// use payroll_engine::models::{PayPeriod, Shift, WageSettings};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
/// let shifts = vec![Shift {
///     id: "shift_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     day_hours: Decimal::from(8),
///     evening_hours: Decimal::ZERO,
///     total_sales: 0,
/// }];
///
/// let statement = compute_statement(&shifts, &[], &WageSettings::default(), &period).unwrap();
/// assert_eq!(statement.day_earnings, Decimal::from_str("21799.04").unwrap());
/// assert_eq!(statement.net_pay, statement.gross_pay - statement.total_deductions);
/// ```
pub fn compute_statement(
    shifts: &[Shift],
    sales: &[Sale],
    settings: &WageSettings,
    period: &PayPeriod,
) -> EngineResult<PayStatement> {
    period.validate()?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let totals = calculate_period_totals(shifts, sales, period, step_number)?;
    steps.push(totals.audit_step.clone());
    step_number += 1;

    let total_hours = totals.total_hours();

    let day_earnings = totals
        .day_hours
        .checked_mul(settings.day_rate)
        .ok_or_else(|| EngineError::overflow("day earnings"))?;
    let evening_earnings = totals
        .evening_hours
        .checked_mul(settings.evening_rate)
        .ok_or_else(|| EngineError::overflow("evening earnings"))?;
    steps.push(AuditStep {
        step_number,
        rule_id: "base_earnings".to_string(),
        rule_name: "Day and Evening Earnings".to_string(),
        input: serde_json::json!({
            "day_hours": totals.day_hours.normalize().to_string(),
            "day_rate": settings.day_rate.normalize().to_string(),
            "evening_hours": totals.evening_hours.normalize().to_string(),
            "evening_rate": settings.evening_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "day_earnings": day_earnings.normalize().to_string(),
            "evening_earnings": evening_earnings.normalize().to_string()
        }),
        reasoning: format!(
            "{} day hours x {} = {}; {} evening hours x {} = {}",
            totals.day_hours.normalize(),
            settings.day_rate.normalize(),
            day_earnings.normalize(),
            totals.evening_hours.normalize(),
            settings.evening_rate.normalize(),
            evening_earnings.normalize()
        ),
    });
    step_number += 1;

    let effective_result = calculate_effective_hours(total_hours, step_number);
    steps.push(effective_result.audit_step.clone());
    step_number += 1;

    let bonus_result = calculate_sales_bonus(totals.total_sales, total_hours, step_number)?;
    steps.push(bonus_result.audit_step.clone());
    step_number += 1;
    let bonus = bonus_result.bonus;

    // Orlof accrues on the bonus as well as on wages.
    let subtotal = day_earnings
        .checked_add(evening_earnings)
        .and_then(|wages| wages.checked_add(bonus))
        .ok_or_else(|| EngineError::overflow("subtotal"))?;
    let vacation_pay = subtotal * VACATION_RATE;
    steps.push(rate_step(
        step_number,
        "vacation_pay",
        "Vacation Pay (Orlof)",
        "subtotal",
        subtotal,
        VACATION_RATE,
        "vacation_pay",
        vacation_pay,
    ));
    step_number += 1;

    let gross_pay = subtotal
        .checked_add(vacation_pay)
        .ok_or_else(|| EngineError::overflow("gross pay"))?;

    let pension_fund = gross_pay * PENSION_RATE;
    steps.push(rate_step(
        step_number,
        "pension_fund",
        "Pension Fund",
        "gross_pay",
        gross_pay,
        PENSION_RATE,
        "pension_fund",
        pension_fund,
    ));
    step_number += 1;

    let union_fee = gross_pay * UNION_RATE;
    steps.push(rate_step(
        step_number,
        "union_fee",
        "Union Fee",
        "gross_pay",
        gross_pay,
        UNION_RATE,
        "union_fee",
        union_fee,
    ));
    step_number += 1;

    // Union dues stay in the taxable base.
    let taxable_income = gross_pay - pension_fund;
    let tax_result = calculate_income_tax(taxable_income, settings, step_number);
    steps.push(tax_result.audit_step.clone());

    let tax = tax_result.breakdown.tax;
    let total_deductions = pension_fund + union_fee + tax;
    let net_pay = gross_pay - total_deductions;

    let sales_per_hour = if total_hours > Decimal::ZERO {
        Decimal::from(totals.total_sales)
            .checked_div(total_hours)
            .ok_or_else(|| EngineError::overflow("sales per hour"))?
            .round_dp(2)
    } else {
        Decimal::ZERO
    };

    Ok(PayStatement {
        period: *period,
        settings: settings.clone(),
        shift_count: totals.shift_count,
        sale_count: totals.sale_count,
        day_hours: totals.day_hours,
        evening_hours: totals.evening_hours,
        total_hours,
        effective_hours: effective_result.effective_hours,
        period_total_sales: totals.total_sales,
        bonus_threshold: bonus_result.threshold,
        sales_per_hour,
        day_earnings,
        evening_earnings,
        bonus,
        subtotal,
        vacation_pay,
        gross_pay,
        pension_fund,
        union_fee,
        taxable_income,
        tax,
        total_deductions,
        net_pay,
        tax_breakdown: tax_result.breakdown,
        sales_breakdown: totals.sales_breakdown,
        audit_trace: AuditTrace {
            steps,
            warnings: totals.warnings,
        },
    })
}

/// Audit step for a `base × rate` line item.
#[allow(clippy::too_many_arguments)]
fn rate_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    base_name: &str,
    base: Decimal,
    rate: Decimal,
    result_name: &str,
    result: Decimal,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            base_name: base.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            result_name: result.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {}% = {}",
            base.normalize(),
            (rate * Decimal::ONE_HUNDRED).normalize(),
            result.normalize()
        ),
    }
}
