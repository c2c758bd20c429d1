//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/statement`,
//! `/periods` and `/team/summary` endpoints, and their conversion into
//! domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayPeriod, Sale, SaleType, Shift, WageSettingsOverride};

/// Explicit period bounds in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayPeriodRequest {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

/// How a request picks its pay period.
///
/// Explicit bounds win over `reference_date`; with neither, the period
/// containing today is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodSelection {
    /// Explicit period bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<PayPeriodRequest>,
    /// Any day inside the wanted 26th-to-25th period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl PeriodSelection {
    /// Resolves the selection, rejecting inverted explicit bounds.
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<PayPeriod> {
        match (&self.period, self.reference_date) {
            (Some(bounds), _) => PayPeriod::new(bounds.start_date, bounds.end_date),
            (None, Some(reference)) => Ok(PayPeriod::containing(reference)),
            (None, None) => Ok(PayPeriod::containing(today)),
        }
    }
}

/// Request body for the `/statement` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRequest {
    /// The agent the statement is for.
    pub agent_id: String,
    /// The pay period to compute.
    #[serde(flatten)]
    pub selection: PeriodSelection,
    /// Settings overriding the agent's stored settings.
    #[serde(default)]
    pub settings: Option<WageSettingsOverride>,
    /// The agent's shifts (may extend beyond the period).
    pub shifts: Vec<ShiftRequest>,
    /// The agent's sales (may extend beyond the period).
    pub sales: Vec<SaleRequest>,
}

/// One agent's records in a team summary request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecordsRequest {
    /// The agent's identifier.
    pub agent_id: String,
    /// Settings overriding the agent's stored settings.
    #[serde(default)]
    pub settings: Option<WageSettingsOverride>,
    /// The agent's shifts.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
    /// The agent's sales.
    #[serde(default)]
    pub sales: Vec<SaleRequest>,
}

/// Request body for the `/team/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummaryRequest {
    /// The pay period to summarize.
    #[serde(flatten)]
    pub selection: PeriodSelection,
    /// Records for every agent on the team.
    pub agents: Vec<AgentRecordsRequest>,
}

/// Query string for the `/periods` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodsQuery {
    /// Any day inside the newest period; defaults to today.
    pub reference_date: Option<NaiveDate>,
    /// Number of periods to return.
    pub count: Option<usize>,
}

/// Shift information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The local calendar day of the shift.
    pub date: NaiveDate,
    /// Day-rate hours.
    pub day_hours: Decimal,
    /// Evening-rate hours.
    #[serde(default)]
    pub evening_hours: Decimal,
    /// Cached sales total shown on the shift.
    #[serde(default)]
    pub total_sales: i64,
}

/// Sale information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    /// Unique identifier for the sale.
    pub id: String,
    /// The local calendar day of the sale.
    pub date: NaiveDate,
    /// The exact instant the sale was recorded.
    pub timestamp: DateTime<Utc>,
    /// Donation amount in whole ISK.
    pub amount: i64,
    /// Charity project name.
    pub project: String,
    /// New donor or upgrade.
    #[serde(default = "default_sale_type")]
    pub sale_type: SaleType,
}

fn default_sale_type() -> SaleType {
    SaleType::New
}

impl From<ShiftRequest> for Shift {
    fn from(req: ShiftRequest) -> Self {
        Shift {
            id: req.id,
            date: req.date,
            day_hours: req.day_hours,
            evening_hours: req.evening_hours,
            total_sales: req.total_sales,
        }
    }
}

impl From<SaleRequest> for Sale {
    fn from(req: SaleRequest) -> Self {
        Sale {
            id: req.id,
            date: req.date,
            timestamp: req.timestamp,
            amount: req.amount,
            project: req.project,
            sale_type: req.sale_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_explicit_period_wins_over_reference_date() {
        let selection = PeriodSelection {
            period: Some(PayPeriodRequest {
                start_date: date(2025, 1, 1),
                end_date: date(2025, 1, 31),
            }),
            reference_date: Some(date(2025, 6, 1)),
        };
        let period = selection.resolve(date(2025, 9, 9)).unwrap();
        assert_eq!(period.start_date, date(2025, 1, 1));
        assert_eq!(period.end_date, date(2025, 1, 31));
    }

    #[test]
    fn test_reference_date_selects_containing_period() {
        let selection = PeriodSelection {
            period: None,
            reference_date: Some(date(2025, 3, 26)),
        };
        let period = selection.resolve(date(2025, 9, 9)).unwrap();
        assert_eq!(period.end_date, date(2025, 4, 25));
    }

    #[test]
    fn test_empty_selection_uses_today() {
        let period = PeriodSelection::default()
            .resolve(date(2025, 9, 9))
            .unwrap();
        assert_eq!(period.start_date, date(2025, 8, 26));
        assert_eq!(period.end_date, date(2025, 9, 25));
    }

    #[test]
    fn test_inverted_explicit_period_is_rejected() {
        let selection = PeriodSelection {
            period: Some(PayPeriodRequest {
                start_date: date(2025, 2, 1),
                end_date: date(2025, 1, 1),
            }),
            reference_date: None,
        };
        assert!(matches!(
            selection.resolve(date(2025, 9, 9)),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_statement_request_deserializes_flattened_selection() {
        let json = r#"{
            "agent_id": "agent_001",
            "reference_date": "2025-04-01",
            "shifts": [
                {"id": "s1", "date": "2025-04-01", "day_hours": "8"}
            ],
            "sales": [
                {"id": "x1", "date": "2025-04-01", "timestamp": "2025-04-01T13:00:00Z",
                 "amount": 2500, "project": "UNICEF"}
            ]
        }"#;
        let request: StatementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.selection.reference_date, Some(date(2025, 4, 1)));
        assert!(request.selection.period.is_none());
        assert!(request.settings.is_none());

        let shift: Shift = request.shifts[0].clone().into();
        assert_eq!(shift.evening_hours, Decimal::ZERO);

        let sale: Sale = request.sales[0].clone().into();
        assert_eq!(sale.sale_type, SaleType::New);
        assert_eq!(sale.amount, 2500);
    }
}
