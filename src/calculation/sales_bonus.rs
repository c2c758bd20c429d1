//! Sales bonus calculation.
//!
//! An agent earns a bonus only on sales above a productivity baseline of
//! 636 ISK per effective hour. Falling short of the baseline yields zero,
//! never a negative bonus.

use rust_decimal::Decimal;

use super::effective_hours::effective_hours;
use super::rates::BONUS_THRESHOLD_PER_HOUR;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Sales required before any bonus is earned: `effective_hours(total_hours) × 636`.
pub fn bonus_threshold(total_hours: Decimal) -> Decimal {
    effective_hours(total_hours) * BONUS_THRESHOLD_PER_HOUR
}

/// Returns `max(0, total_sales - bonus_threshold(total_hours))`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::sales_bonus;
/// use rust_decimal::Decimal;
///
/// // 100 hours -> 87.5 effective hours -> 55,650 ISK threshold
/// assert_eq!(sales_bonus(2_000_000, Decimal::from(100)), Decimal::from(1_944_350));
/// assert_eq!(sales_bonus(50_000, Decimal::from(100)), Decimal::ZERO);
/// ```
pub fn sales_bonus(total_sales: i64, total_hours: Decimal) -> Decimal {
    (Decimal::from(total_sales) - bonus_threshold(total_hours)).max(Decimal::ZERO)
}

/// The result of the sales bonus step.
#[derive(Debug, Clone)]
pub struct SalesBonusResult {
    /// Effective hours the threshold was based on.
    pub effective_hours: Decimal,
    /// Sales needed before a bonus is earned.
    pub threshold: Decimal,
    /// The bonus, never negative.
    pub bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the sales bonus and records the step.
///
/// Unlike [`sales_bonus`], reports a calculation error instead of panicking
/// when the threshold does not fit in a `Decimal`.
pub fn calculate_sales_bonus(
    total_sales: i64,
    total_hours: Decimal,
    step_number: u32,
) -> EngineResult<SalesBonusResult> {
    let effective = effective_hours(total_hours);
    let threshold = effective
        .checked_mul(BONUS_THRESHOLD_PER_HOUR)
        .ok_or_else(|| EngineError::overflow("bonus threshold"))?;
    let bonus = Decimal::from(total_sales)
        .checked_sub(threshold)
        .ok_or_else(|| EngineError::overflow("sales bonus"))?
        .max(Decimal::ZERO);

    let reasoning = if bonus > Decimal::ZERO {
        format!(
            "Sales {} exceed threshold {} ({} effective hours x {}): bonus {}",
            total_sales,
            threshold.normalize(),
            effective.normalize(),
            BONUS_THRESHOLD_PER_HOUR,
            bonus.normalize()
        )
    } else {
        format!(
            "Sales {} do not exceed threshold {} ({} effective hours x {}): no bonus",
            total_sales,
            threshold.normalize(),
            effective.normalize(),
            BONUS_THRESHOLD_PER_HOUR
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "sales_bonus".to_string(),
        rule_name: "Sales Bonus".to_string(),
        input: serde_json::json!({
            "total_sales": total_sales,
            "total_hours": total_hours.normalize().to_string(),
            "threshold_per_hour": BONUS_THRESHOLD_PER_HOUR.to_string()
        }),
        output: serde_json::json!({
            "effective_hours": effective.normalize().to_string(),
            "threshold": threshold.normalize().to_string(),
            "bonus": bonus.normalize().to_string()
        }),
        reasoning,
    };

    Ok(SalesBonusResult {
        effective_hours: effective,
        threshold,
        bonus,
        audit_step,
    })
}
