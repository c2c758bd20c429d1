//! Sale model.
//!
//! A sale is a single donation recorded by an agent against one of the
//! charity projects. Sale records are the authoritative source for every
//! sales figure in a pay statement.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Whether a sale signed up a new donor or raised an existing donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    /// A new recurring donor.
    New,
    /// An existing donor increasing their contribution.
    Upgrade,
}

impl SaleType {
    /// The wire name of the sale type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::New => "new",
            SaleType::Upgrade => "upgrade",
        }
    }
}

/// A single donation event.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Sale, SaleType};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let sale = Sale {
///     id: "sale_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 27).unwrap(),
///     timestamp: Utc.with_ymd_and_hms(2025, 3, 27, 14, 5, 0).unwrap(),
///     amount: 3500,
///     project: "UNICEF".to_string(),
///     sale_type: SaleType::New,
/// };
///
/// assert!(sale.validate(&["UNICEF".to_string()]).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
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
    pub sale_type: SaleType,
}

/// Largest single donation accepted, ISK.
pub const MAX_SALE_AMOUNT: i64 = 100_000_000;

impl Sale {
    /// Boundary validation: an amount in `1..=MAX_SALE_AMOUNT` and a known project.
    ///
    /// An empty `projects` list accepts any project name.
    pub fn validate(&self, projects: &[String]) -> EngineResult<()> {
        if self.amount <= 0 {
            return Err(EngineError::InvalidSale {
                sale_id: self.id.clone(),
                message: format!("amount must be positive, got {}", self.amount),
            });
        }
        if self.amount > MAX_SALE_AMOUNT {
            return Err(EngineError::InvalidSale {
                sale_id: self.id.clone(),
                message: format!(
                    "amount cannot exceed {} ISK, got {}",
                    MAX_SALE_AMOUNT, self.amount
                ),
            });
        }
        if !projects.is_empty() && !projects.iter().any(|p| p == &self.project) {
            return Err(EngineError::InvalidSale {
                sale_id: self.id.clone(),
                message: format!("unknown project '{}'", self.project),
            });
        }
        Ok(())
    }
}
