//! Effective hours calculation.
//!
//! Worked hours are reduced by a flat 12.5% to account for unpaid breaks
//! (7.5 minutes per hour, about one hour per 8-hour shift). The reduction is
//! uniform; shift length does not matter.

use rust_decimal::Decimal;

use super::rates::EFFECTIVE_HOURS_MULTIPLIER;
use crate::models::AuditStep;

/// Returns `max(total_hours, 0) × 0.875`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::effective_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(effective_hours(Decimal::from(8)), Decimal::from(7));
/// assert_eq!(effective_hours(Decimal::from_str("-3").unwrap()), Decimal::ZERO);
/// ```
pub fn effective_hours(total_hours: Decimal) -> Decimal {
    total_hours.max(Decimal::ZERO) * EFFECTIVE_HOURS_MULTIPLIER
}

/// The result of the effective hours step.
#[derive(Debug, Clone)]
pub struct EffectiveHoursResult {
    /// Hours after the break deduction.
    pub effective_hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes effective hours and records the step.
pub fn calculate_effective_hours(total_hours: Decimal, step_number: u32) -> EffectiveHoursResult {
    let effective = effective_hours(total_hours);

    let audit_step = AuditStep {
        step_number,
        rule_id: "effective_hours".to_string(),
        rule_name: "Effective Hours".to_string(),
        input: serde_json::json!({
            "total_hours": total_hours.normalize().to_string(),
            "multiplier": EFFECTIVE_HOURS_MULTIPLIER.normalize().to_string()
        }),
        output: serde_json::json!({
            "effective_hours": effective.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours x {} = {} effective hours",
            total_hours.max(Decimal::ZERO).normalize(),
            EFFECTIVE_HOURS_MULTIPLIER.normalize(),
            effective.normalize()
        ),
    };

    EffectiveHoursResult {
        effective_hours: effective,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_hours_is_zero() {
        assert_eq!(effective_hours(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_eight_hour_shift_loses_one_hour() {
        assert_eq!(effective_hours(dec("8")), dec("7"));
    }

    #[test]
    fn test_hundred_hours() {
        assert_eq!(effective_hours(dec("100")), dec("87.5"));
    }

    #[test]
    fn test_fractional_hours_are_exact() {
        assert_eq!(effective_hours(dec("1.1")), dec("0.9625"));
    }

    #[test]
    fn test_negative_hours_clamp_to_zero() {
        assert_eq!(effective_hours(dec("-4.5")), Decimal::ZERO);
    }

    #[test]
    fn test_output_never_exceeds_input() {
        for h in ["0.5", "3", "7.75", "160"] {
            assert!(effective_hours(dec(h)) <= dec(h));
        }
    }

    #[test]
    fn test_audit_step_records_input_and_output() {
        let result = calculate_effective_hours(dec("100"), 2);
        assert_eq!(result.effective_hours, dec("87.5"));
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "effective_hours");
        assert_eq!(
            result.audit_step.input["total_hours"].as_str().unwrap(),
            "100"
        );
        assert_eq!(
            result.audit_step.output["effective_hours"]
                .as_str()
                .unwrap(),
            "87.5"
        );
        assert!(result.audit_step.reasoning.contains("0.875"));
    }
}
