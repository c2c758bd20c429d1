//! Pay statement models.
//!
//! This module contains the [`PayStatement`] type and its supporting structures:
//! the per-bracket tax lines, the period's sales breakdown, and the audit trace
//! that records how each line item was derived.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayPeriod, SaleType, WageSettings};
use crate::error::{EngineError, EngineResult};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag suspicious input without changing the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a statement.
///
/// Contains no timings, so two computations over the same inputs produce
/// identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The portion of taxable income that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketLine {
    /// 1-based bracket number.
    pub bracket: u32,
    /// Lower bound of the bracket, ISK.
    pub lower: Decimal,
    /// Upper bound of the bracket, `None` for the open top bracket.
    pub upper: Option<Decimal>,
    /// Marginal rate applied in this bracket.
    pub rate: Decimal,
    /// Income taxed in this bracket.
    pub taxable_amount: Decimal,
    /// `taxable_amount × rate`.
    pub tax: Decimal,
}

/// Itemized income tax for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBreakdown {
    /// The income the brackets were applied to.
    pub taxable_income: Decimal,
    /// Bracket lines actually touched, ascending.
    pub brackets: Vec<TaxBracketLine>,
    /// Sum of the bracket taxes before the personal allowance.
    pub gross_tax: Decimal,
    /// `personal_allowance × allowance_usage`.
    pub allowance_credit: Decimal,
    /// `max(0, gross_tax - allowance_credit)`.
    pub tax: Decimal,
}

/// Count and amount of a group of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    /// Number of sales.
    pub count: usize,
    /// Sum of amounts, ISK.
    pub amount: i64,
}

impl SaleTotals {
    /// Adds one sale of `amount`.
    ///
    /// Fails with a calculation error when the amount sum leaves the `i64` range.
    pub fn record(&mut self, amount: i64) -> EngineResult<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or_else(|| EngineError::overflow("sales amount"))?;
        self.count += 1;
        Ok(())
    }

    /// Adds another group of totals into this one.
    pub fn absorb(&mut self, other: &SaleTotals) -> EngineResult<()> {
        self.amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| EngineError::overflow("sales amount"))?;
        self.count += other.count;
        Ok(())
    }
}

/// How the period's sales split across projects and sale types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesBreakdown {
    /// Totals per charity project, ordered by project name.
    pub by_project: BTreeMap<String, SaleTotals>,
    /// Sales that signed up a new donor.
    pub new: SaleTotals,
    /// Sales that upgraded an existing donor.
    pub upgrade: SaleTotals,
}

impl SalesBreakdown {
    /// Records one sale under its project and type.
    pub fn record(
        &mut self,
        project: &str,
        sale_type: SaleType,
        amount: i64,
    ) -> EngineResult<()> {
        self.by_project
            .entry(project.to_string())
            .or_default()
            .record(amount)?;
        match sale_type {
            SaleType::New => self.new.record(amount),
            SaleType::Upgrade => self.upgrade.record(amount),
        }
    }

}

/// The itemized pay statement for one agent and one pay period.
///
/// Every intermediate figure is kept because each one is shown to the agent
/// as a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStatement {
    /// The pay period the statement covers.
    pub period: PayPeriod,
    /// The resolved wage settings the statement was computed with.
    pub settings: WageSettings,
    /// Number of shifts inside the period.
    pub shift_count: usize,
    /// Number of sales inside the period.
    pub sale_count: usize,
    /// Total day-rate hours.
    pub day_hours: Decimal,
    /// Total evening-rate hours.
    pub evening_hours: Decimal,
    /// Day plus evening hours.
    pub total_hours: Decimal,
    /// Hours after the implicit break deduction.
    pub effective_hours: Decimal,
    /// Sum of sale amounts in the period, ISK.
    pub period_total_sales: i64,
    /// Sales needed before any bonus is earned.
    pub bonus_threshold: Decimal,
    /// Period sales divided by total hours (zero without hours).
    pub sales_per_hour: Decimal,
    /// `day_hours × day_rate`.
    pub day_earnings: Decimal,
    /// `evening_hours × evening_rate`.
    pub evening_earnings: Decimal,
    /// Sales bonus.
    pub bonus: Decimal,
    /// Wages plus bonus.
    pub subtotal: Decimal,
    /// Vacation pay (orlof) on the subtotal.
    pub vacation_pay: Decimal,
    /// Subtotal plus vacation pay.
    pub gross_pay: Decimal,
    /// Employee pension contribution.
    pub pension_fund: Decimal,
    /// Union dues.
    pub union_fee: Decimal,
    /// Gross pay less pension (union fee is not deducted).
    pub taxable_income: Decimal,
    /// Income tax after the personal allowance.
    pub tax: Decimal,
    /// Pension plus union fee plus tax.
    pub total_deductions: Decimal,
    /// Gross pay less total deductions.
    pub net_pay: Decimal,
    /// Per-bracket tax detail.
    pub tax_breakdown: IncomeTaxBreakdown,
    /// Sales split by project and type.
    pub sales_breakdown: SalesBreakdown,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_totals_record_accumulates() {
        let mut totals = SaleTotals::default();
        totals.record(1500).unwrap();
        totals.record(2500).unwrap();
        assert_eq!(totals.count, 2);
        assert_eq!(totals.amount, 4000);
    }

    #[test]
    fn test_sale_totals_absorb_merges_groups() {
        let mut a = SaleTotals {
            count: 2,
            amount: 5000,
        };
        a.absorb(&SaleTotals {
            count: 1,
            amount: 1200,
        })
        .unwrap();
        assert_eq!(a, SaleTotals { count: 3, amount: 6200 });
    }

    #[test]
    fn test_sale_totals_record_reports_overflow() {
        let mut totals = SaleTotals::default();
        totals.record(i64::MAX).unwrap();
        match totals.record(1) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("overflowed"));
            }
            _ => panic!("Expected CalculationError"),
        }
        assert_eq!(totals, SaleTotals { count: 1, amount: i64::MAX });
    }

    #[test]
    fn test_sale_totals_absorb_reports_overflow() {
        let mut a = SaleTotals {
            count: 1,
            amount: 5_000_000_000_000_000_000,
        };
        let result = a.absorb(&SaleTotals {
            count: 1,
            amount: 5_000_000_000_000_000_000,
        });
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_sales_breakdown_splits_by_project_and_type() {
        let mut breakdown = SalesBreakdown::default();
        breakdown.record("UNICEF", SaleType::New, 3000).unwrap();
        breakdown.record("UNICEF", SaleType::Upgrade, 1000).unwrap();
        breakdown.record("Barnaheill", SaleType::New, 2000).unwrap();

        assert_eq!(breakdown.by_project["UNICEF"].amount, 4000);
        assert_eq!(breakdown.by_project["Barnaheill"].count, 1);
        assert_eq!(breakdown.new, SaleTotals { count: 2, amount: 5000 });
        assert_eq!(breakdown.upgrade, SaleTotals { count: 1, amount: 1000 });
    }

    #[test]
    fn test_sales_breakdown_projects_are_ordered() {
        let mut breakdown = SalesBreakdown::default();
        breakdown.record("UNICEF", SaleType::New, 1).unwrap();
        breakdown.record("Amnesty", SaleType::New, 1).unwrap();
        let names: Vec<&String> = breakdown.by_project.keys().collect();
        assert_eq!(names, vec!["Amnesty", "UNICEF"]);
    }

    #[test]
    fn test_tax_bracket_line_serializes_open_upper_as_null() {
        let line = TaxBracketLine {
            bracket: 3,
            lower: Decimal::new(1273190, 0),
            upper: None,
            rate: Decimal::new(4625, 4),
            taxable_amount: Decimal::new(100, 0),
            tax: Decimal::new(4625, 2),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"upper\":null"));
        assert!(json.contains("\"rate\":\"0.4625\""));
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
