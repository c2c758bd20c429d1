//! Period windowing.
//!
//! Filters shifts and sales to a pay period (inclusive on both ends) and
//! reduces them to the hour and sales totals the statement is built from.
//! Sale records are authoritative; the cached `Shift::total_sales` is only
//! compared against them.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, PayPeriod, Sale, SalesBreakdown, Shift};

/// Totals for one pay period.
#[derive(Debug, Clone)]
pub struct PeriodTotals {
    /// Shifts whose date falls inside the period.
    pub shift_count: usize,
    /// Sales whose date falls inside the period.
    pub sale_count: usize,
    /// Sum of day hours, negative buckets clamped to zero.
    pub day_hours: Decimal,
    /// Sum of evening hours, negative buckets clamped to zero.
    pub evening_hours: Decimal,
    /// Sum of sale amounts.
    pub total_sales: i64,
    /// Sum of the shifts' cached sales figures.
    pub cached_shift_sales: i64,
    /// Sales split by project and type.
    pub sales_breakdown: SalesBreakdown,
    /// Warnings about the input records.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording the filtering.
    pub audit_step: AuditStep,
}

impl PeriodTotals {
    /// Day plus evening hours. The sum was checked when the totals were built.
    pub fn total_hours(&self) -> Decimal {
        self.day_hours + self.evening_hours
    }
}

/// Reduces the records that fall inside `period` to totals.
///
/// The result does not depend on the order of `shifts` or `sales`. Fails with
/// a calculation error when an hour or sales sum leaves its numeric range;
/// the cached shift sales, being informational, saturate instead.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_period_totals;
/// use payroll_engine::models::{PayPeriod, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
/// let shifts = vec![
///     Shift {
///         id: "in".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 4, 25).unwrap(),
///         day_hours: Decimal::from(6),
///         evening_hours: Decimal::from(2),
///         total_sales: 0,
///     },
///     Shift {
///         id: "out".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
///         day_hours: Decimal::from(8),
///         evening_hours: Decimal::ZERO,
///         total_sales: 0,
///     },
/// ];
///
/// let totals = calculate_period_totals(&shifts, &[], &period, 1).unwrap();
/// assert_eq!(totals.shift_count, 1);
/// assert_eq!(totals.total_hours(), Decimal::from(8));
/// ```
pub fn calculate_period_totals(
    shifts: &[Shift],
    sales: &[Sale],
    period: &PayPeriod,
    step_number: u32,
) -> EngineResult<PeriodTotals> {
    let mut shift_count = 0;
    let mut day_hours = Decimal::ZERO;
    let mut evening_hours = Decimal::ZERO;
    let mut cached_shift_sales: i64 = 0;
    let mut clamped_shifts: Vec<&str> = Vec::new();

    for shift in shifts.iter().filter(|s| period.contains_date(s.date)) {
        shift_count += 1;
        if shift.day_hours < Decimal::ZERO || shift.evening_hours < Decimal::ZERO {
            clamped_shifts.push(&shift.id);
        }
        day_hours = day_hours
            .checked_add(shift.day_hours.max(Decimal::ZERO))
            .ok_or_else(|| EngineError::overflow("period day hours"))?;
        evening_hours = evening_hours
            .checked_add(shift.evening_hours.max(Decimal::ZERO))
            .ok_or_else(|| EngineError::overflow("period evening hours"))?;
        cached_shift_sales = cached_shift_sales.saturating_add(shift.total_sales);
    }
    day_hours
        .checked_add(evening_hours)
        .ok_or_else(|| EngineError::overflow("period hours"))?;

    let mut sale_count = 0;
    let mut total_sales: i64 = 0;
    let mut sales_breakdown = SalesBreakdown::default();

    for sale in sales.iter().filter(|s| period.contains_date(s.date)) {
        sale_count += 1;
        total_sales = total_sales
            .checked_add(sale.amount)
            .ok_or_else(|| EngineError::overflow("period sales total"))?;
        sales_breakdown.record(&sale.project, sale.sale_type, sale.amount)?;
    }

    let mut warnings = Vec::new();

    if !clamped_shifts.is_empty() {
        // Sorted so the message is independent of input order.
        clamped_shifts.sort_unstable();
        warnings.push(AuditWarning {
            code: "NEGATIVE_HOURS_CLAMPED".to_string(),
            message: format!(
                "Negative hours treated as zero for shifts: {}",
                clamped_shifts.join(", ")
            ),
            severity: "high".to_string(),
        });
    }

    if shift_count > 0 && cached_shift_sales != total_sales {
        warnings.push(AuditWarning {
            code: "SHIFT_SALES_CACHE_MISMATCH".to_string(),
            message: format!(
                "Cached shift sales total {} differs from recorded sales total {}; using recorded sales",
                cached_shift_sales, total_sales
            ),
            severity: "low".to_string(),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "period_filter".to_string(),
        rule_name: "Pay Period Filter".to_string(),
        input: serde_json::json!({
            "start_date": period.start_date.to_string(),
            "end_date": period.end_date.to_string(),
            "shifts_supplied": shifts.len(),
            "sales_supplied": sales.len()
        }),
        output: serde_json::json!({
            "shift_count": shift_count,
            "sale_count": sale_count,
            "day_hours": day_hours.normalize().to_string(),
            "evening_hours": evening_hours.normalize().to_string(),
            "total_sales": total_sales
        }),
        reasoning: format!(
            "{} of {} shifts and {} of {} sales fall within {}",
            shift_count,
            shifts.len(),
            sale_count,
            sales.len(),
            period
        ),
    };

    Ok(PeriodTotals {
        shift_count,
        sale_count,
        day_hours,
        evening_hours,
        total_sales,
        cached_shift_sales,
        sales_breakdown,
        warnings,
        audit_step,
    })
}
