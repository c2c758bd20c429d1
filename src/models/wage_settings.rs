//! Per-agent wage settings.
//!
//! Every default lives here. Callers resolve partial overrides against these
//! defaults once at the boundary, so the engine only ever sees a fully
//! specified [`WageSettings`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default day rate, ISK per hour.
pub const DEFAULT_DAY_RATE: Decimal = Decimal::from_parts(272488, 0, 0, false, 2);

/// Default evening rate, ISK per hour.
pub const DEFAULT_EVENING_RATE: Decimal = Decimal::from_parts(376847, 0, 0, false, 2);

/// Default monthly personal tax allowance (persónuafsláttur), ISK.
pub const DEFAULT_PERSONAL_ALLOWANCE: Decimal = Decimal::from_parts(64171, 0, 0, false, 0);

/// Default share of the personal allowance applied to this job.
pub const DEFAULT_ALLOWANCE_USAGE: Decimal = Decimal::ONE;

/// Highest hourly rate accepted, ISK.
pub const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Highest monthly personal allowance accepted, ISK.
pub const MAX_PERSONAL_ALLOWANCE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Wage configuration for one agent.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WageSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = WageSettings::default();
/// assert_eq!(settings.day_rate, Decimal::from_str("2724.88").unwrap());
/// assert_eq!(settings.allowance_usage, Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageSettings {
    /// ISK per day-rate hour.
    pub day_rate: Decimal,
    /// ISK per evening-rate hour.
    pub evening_rate: Decimal,
    /// Monthly personal allowance credited against income tax.
    pub personal_allowance: Decimal,
    /// Fraction in `[0, 1]` of the personal allowance used in this period.
    pub allowance_usage: Decimal,
}

impl Default for WageSettings {
    fn default() -> Self {
        Self {
            day_rate: DEFAULT_DAY_RATE,
            evening_rate: DEFAULT_EVENING_RATE,
            personal_allowance: DEFAULT_PERSONAL_ALLOWANCE,
            allowance_usage: DEFAULT_ALLOWANCE_USAGE,
        }
    }
}

impl WageSettings {
    /// The flat tax credit for the period: `personal_allowance × allowance_usage`.
    pub fn allowance_credit(&self) -> Decimal {
        self.personal_allowance * self.allowance_usage
    }

    /// Checks that rates and allowance lie between zero and their ceilings and
    /// usage is within `[0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        let bounded = [
            ("day_rate", self.day_rate, MAX_HOURLY_RATE),
            ("evening_rate", self.evening_rate, MAX_HOURLY_RATE),
            (
                "personal_allowance",
                self.personal_allowance,
                MAX_PERSONAL_ALLOWANCE,
            ),
        ];
        for (field, value, max) in bounded {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidSettings {
                    field: field.to_string(),
                    message: format!("cannot be negative, got {}", value),
                });
            }
            if value > max {
                return Err(EngineError::InvalidSettings {
                    field: field.to_string(),
                    message: format!("cannot exceed {}, got {}", max, value),
                });
            }
        }

        if self.allowance_usage < Decimal::ZERO || self.allowance_usage > Decimal::ONE {
            return Err(EngineError::InvalidSettings {
                field: "allowance_usage".to_string(),
                message: format!("must be between 0 and 1, got {}", self.allowance_usage),
            });
        }

        Ok(())
    }
}

/// A partial set of wage settings, as stored per agent or sent by a client.
///
/// Missing fields fall back to the base settings in [`WageSettingsOverride::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageSettingsOverride {
    /// Overrides the day rate.
    #[serde(default)]
    pub day_rate: Option<Decimal>,
    /// Overrides the evening rate.
    #[serde(default)]
    pub evening_rate: Option<Decimal>,
    /// Overrides the personal allowance.
    #[serde(default)]
    pub personal_allowance: Option<Decimal>,
    /// Overrides the allowance usage.
    #[serde(default)]
    pub allowance_usage: Option<Decimal>,
}

impl WageSettingsOverride {
    /// Fills every missing field from `base`.
    pub fn resolve(&self, base: &WageSettings) -> WageSettings {
        WageSettings {
            day_rate: self.day_rate.unwrap_or(base.day_rate),
            evening_rate: self.evening_rate.unwrap_or(base.evening_rate),
            personal_allowance: self.personal_allowance.unwrap_or(base.personal_allowance),
            allowance_usage: self.allowance_usage.unwrap_or(base.allowance_usage),
        }
    }

    /// Layers `self` on top of `other`; fields set here win.
    pub fn merged_over(&self, other: &WageSettingsOverride) -> WageSettingsOverride {
        WageSettingsOverride {
            day_rate: self.day_rate.or(other.day_rate),
            evening_rate: self.evening_rate.or(other.evening_rate),
            personal_allowance: self.personal_allowance.or(other.personal_allowance),
            allowance_usage: self.allowance_usage.or(other.allowance_usage),
        }
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
    fn test_default_settings_match_published_rates() {
        let settings = WageSettings::default();
        assert_eq!(settings.day_rate, dec("2724.88"));
        assert_eq!(settings.evening_rate, dec("3768.47"));
        assert_eq!(settings.personal_allowance, dec("64171"));
        assert_eq!(settings.allowance_usage, dec("1"));
    }

    #[test]
    fn test_allowance_credit_scales_with_usage() {
        let settings = WageSettings {
            allowance_usage: dec("0.5"),
            ..WageSettings::default()
        };
        assert_eq!(settings.allowance_credit(), dec("32085.5"));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(WageSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_usage_above_one() {
        let settings = WageSettings {
            allowance_usage: dec("1.01"),
            ..WageSettings::default()
        };
        match settings.validate() {
            Err(EngineError::InvalidSettings { field, .. }) => {
                assert_eq!(field, "allowance_usage");
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let settings = WageSettings {
            evening_rate: dec("-1"),
            ..WageSettings::default()
        };
        match settings.validate() {
            Err(EngineError::InvalidSettings { field, .. }) => {
                assert_eq!(field, "evening_rate");
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_validate_rejects_rate_above_ceiling() {
        let settings = WageSettings {
            day_rate: dec("79228162514264337593543950"),
            ..WageSettings::default()
        };
        match settings.validate() {
            Err(EngineError::InvalidSettings { field, message }) => {
                assert_eq!(field, "day_rate");
                assert!(message.contains("cannot exceed"));
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_validate_accepts_rate_at_ceiling() {
        let settings = WageSettings {
            evening_rate: MAX_HOURLY_RATE,
            ..WageSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_override_resolves_to_base() {
        let base = WageSettings::default();
        assert_eq!(WageSettingsOverride::default().resolve(&base), base);
    }

    #[test]
    fn test_partial_override_keeps_other_fields() {
        let partial = WageSettingsOverride {
            day_rate: Some(dec("3000")),
            allowance_usage: Some(dec("0")),
            ..Default::default()
        };
        let resolved = partial.resolve(&WageSettings::default());
        assert_eq!(resolved.day_rate, dec("3000"));
        assert_eq!(resolved.evening_rate, dec("3768.47"));
        assert_eq!(resolved.allowance_usage, dec("0"));
    }

    #[test]
    fn test_merged_over_prefers_self() {
        let request = WageSettingsOverride {
            day_rate: Some(dec("3100")),
            ..Default::default()
        };
        let stored = WageSettingsOverride {
            day_rate: Some(dec("2900")),
            evening_rate: Some(dec("4000")),
            ..Default::default()
        };
        let merged = request.merged_over(&stored);
        assert_eq!(merged.day_rate, Some(dec("3100")));
        assert_eq!(merged.evening_rate, Some(dec("4000")));
        assert_eq!(merged.personal_allowance, None);
    }

    #[test]
    fn test_deserialize_override_with_missing_fields() {
        let json = r#"{"evening_rate": "3900.5"}"#;
        let partial: WageSettingsOverride = serde_json::from_str(json).unwrap();
        assert_eq!(partial.evening_rate, Some(dec("3900.5")));
        assert!(partial.day_rate.is_none());
    }
}
