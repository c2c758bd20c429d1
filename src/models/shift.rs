//! Shift model.
//!
//! A shift is a completed work session, already split by the clock-out action
//! into day-rate and evening-rate hours.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Most hours a single shift may record across both buckets.
pub const MAX_SHIFT_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Represents a completed work shift.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Shift;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shift = Shift {
///     id: "shift_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 27).unwrap(),
///     day_hours: Decimal::new(6, 0),
///     evening_hours: Decimal::new(2, 0),
///     total_sales: 45000,
/// };
///
/// assert_eq!(shift.total_hours(), Decimal::new(8, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The local calendar day the shift belongs to.
    pub date: NaiveDate,
    /// Hours paid at the day rate.
    pub day_hours: Decimal,
    /// Hours paid at the evening rate.
    pub evening_hours: Decimal,
    /// Cached sum of the sales attributed to this shift.
    ///
    /// Display only. Period aggregation always recomputes from [`Sale`](super::Sale)
    /// records.
    #[serde(default)]
    pub total_sales: i64,
}

impl Shift {
    /// Day hours plus evening hours.
    pub fn total_hours(&self) -> Decimal {
        self.day_hours + self.evening_hours
    }

    /// Rejects negative hour buckets, shifts longer than a day and a negative
    /// cached sales figure.
    ///
    /// Used at the request boundary; the engine itself clamps negative hours
    /// instead.
    pub fn validate(&self) -> EngineResult<()> {
        if self.day_hours < Decimal::ZERO {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: "day_hours cannot be negative".to_string(),
            });
        }
        if self.evening_hours < Decimal::ZERO {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: "evening_hours cannot be negative".to_string(),
            });
        }
        if self.day_hours > MAX_SHIFT_HOURS
            || self.evening_hours > MAX_SHIFT_HOURS
            || self.total_hours() > MAX_SHIFT_HOURS
        {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!(
                    "cannot exceed {} hours, got {} day and {} evening",
                    MAX_SHIFT_HOURS, self.day_hours, self.evening_hours
                ),
            });
        }
        if self.total_sales < 0 {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!("total_sales cannot be negative, got {}", self.total_sales),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_shift(day: &str, evening: &str) -> Shift {
        Shift {
            id: "shift_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 27).unwrap(),
            day_hours: dec(day),
            evening_hours: dec(evening),
            total_sales: 0,
        }
    }

    #[test]
    fn test_total_hours_sums_both_buckets() {
        let shift = create_shift("5.5", "2.25");
        assert_eq!(shift.total_hours(), dec("7.75"));
    }

    #[test]
    fn test_total_hours_evening_only() {
        let shift = create_shift("0", "4");
        assert_eq!(shift.total_hours(), dec("4"));
    }

    #[test]
    fn test_validate_accepts_zero_hours() {
        assert!(create_shift("0", "0").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_day_hours() {
        let result = create_shift("-1", "2").validate();
        match result {
            Err(EngineError::InvalidShift { shift_id, message }) => {
                assert_eq!(shift_id, "shift_001");
                assert!(message.contains("day_hours"));
            }
            _ => panic!("Expected InvalidShift error"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_evening_hours() {
        let result = create_shift("2", "-0.5").validate();
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_validate_accepts_full_day() {
        assert!(create_shift("16", "8").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_more_than_a_day() {
        let result = create_shift("20", "4.5").validate();
        match result {
            Err(EngineError::InvalidShift { message, .. }) => {
                assert!(message.contains("24"));
            }
            _ => panic!("Expected InvalidShift error"),
        }
    }

    #[test]
    fn test_validate_rejects_huge_hours_without_overflow() {
        let shift = create_shift("79228162514264337593543950", "79228162514264337593543950");
        assert!(matches!(
            shift.validate(),
            Err(EngineError::InvalidShift { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_cached_sales() {
        let mut shift = create_shift("8", "0");
        shift.total_sales = -1;
        match shift.validate() {
            Err(EngineError::InvalidShift { message, .. }) => {
                assert!(message.contains("total_sales"));
            }
            _ => panic!("Expected InvalidShift error"),
        }
    }

    #[test]
    fn test_deserialize_shift_without_cached_sales() {
        let json = r#"{
            "id": "shift_002",
            "date": "2025-04-01",
            "day_hours": "6.5",
            "evening_hours": "1.5"
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(shift.total_hours(), dec("8"));
        assert_eq!(shift.total_sales, 0);
    }

    #[test]
    fn test_serialize_shift_uses_string_decimals() {
        let shift = create_shift("6.5", "1.5");
        let json = serde_json::to_string(&shift).unwrap();
        assert!(json.contains("\"date\":\"2025-03-27\""));
        assert!(json.contains("\"day_hours\":\"6.5\""));
    }
}
