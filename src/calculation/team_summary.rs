//! Team-wide aggregation for managers.
//!
//! Rolls a set of per-agent statements for the same period into team totals
//! and a ranking by sales.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayStatement, SaleTotals};

/// A computed statement tagged with the agent it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatement {
    /// The agent's identifier.
    pub agent_id: String,
    /// The agent's statement for the period.
    pub statement: PayStatement,
}

/// One agent's row in the team summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummaryRow {
    /// The agent's identifier.
    pub agent_id: String,
    /// Hours worked.
    pub total_hours: Decimal,
    /// Sales recorded, ISK.
    pub period_total_sales: i64,
    /// Sales per worked hour.
    pub sales_per_hour: Decimal,
    /// Bonus earned.
    pub bonus: Decimal,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}

/// Aggregated figures for a team over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// The period summarized.
    pub period: PayPeriod,
    /// Number of agents included.
    pub agent_count: usize,
    /// Hours across the team.
    pub total_hours: Decimal,
    /// Sales across the team, ISK.
    pub total_sales: i64,
    /// Bonus across the team.
    pub total_bonus: Decimal,
    /// Gross pay across the team.
    pub total_gross_pay: Decimal,
    /// Net pay across the team.
    pub total_net_pay: Decimal,
    /// Team sales per worked hour.
    pub sales_per_hour: Decimal,
    /// Sales per project across the team.
    pub by_project: BTreeMap<String, SaleTotals>,
    /// Agents ranked by sales, highest first.
    pub agents: Vec<AgentSummaryRow>,
}

/// Summarizes agent statements for `period`.
///
/// Rows are sorted by sales descending, ties broken by agent id, so the
/// output does not depend on input order. Fails with a calculation error when
/// a team total leaves its numeric range.
pub fn summarize_team(
    period: &PayPeriod,
    statements: &[AgentStatement],
) -> EngineResult<TeamSummary> {
    let mut total_hours = Decimal::ZERO;
    let mut total_sales: i64 = 0;
    let mut total_bonus = Decimal::ZERO;
    let mut total_gross_pay = Decimal::ZERO;
    let mut total_net_pay = Decimal::ZERO;
    let mut by_project: BTreeMap<String, SaleTotals> = BTreeMap::new();
    let mut agents = Vec::with_capacity(statements.len());

    for AgentStatement {
        agent_id,
        statement,
    } in statements
    {
        total_hours = add_decimal(total_hours, statement.total_hours, "team hours")?;
        total_sales = total_sales
            .checked_add(statement.period_total_sales)
            .ok_or_else(|| EngineError::overflow("team sales total"))?;
        total_bonus = add_decimal(total_bonus, statement.bonus, "team bonus")?;
        total_gross_pay = add_decimal(total_gross_pay, statement.gross_pay, "team gross pay")?;
        total_net_pay = add_decimal(total_net_pay, statement.net_pay, "team net pay")?;

        for (project, totals) in &statement.sales_breakdown.by_project {
            by_project.entry(project.clone()).or_default().absorb(totals)?;
        }

        agents.push(AgentSummaryRow {
            agent_id: agent_id.clone(),
            total_hours: statement.total_hours,
            period_total_sales: statement.period_total_sales,
            sales_per_hour: statement.sales_per_hour,
            bonus: statement.bonus,
            gross_pay: statement.gross_pay,
            net_pay: statement.net_pay,
        });
    }

    agents.sort_by(|a, b| {
        b.period_total_sales
            .cmp(&a.period_total_sales)
            .then_with(|| a.agent_id.cmp(&b.agent_id))
    });

    let sales_per_hour = if total_hours > Decimal::ZERO {
        Decimal::from(total_sales)
            .checked_div(total_hours)
            .ok_or_else(|| EngineError::overflow("team sales per hour"))?
            .round_dp(2)
    } else {
        Decimal::ZERO
    };

    Ok(TeamSummary {
        period: *period,
        agent_count: statements.len(),
        total_hours,
        total_sales,
        total_bonus,
        total_gross_pay,
        total_net_pay,
        sales_per_hour,
        by_project,
        agents,
    })
}

fn add_decimal(total: Decimal, value: Decimal, quantity: &str) -> EngineResult<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| EngineError::overflow(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_statement;
    use crate::models::{Sale, SaleType, Shift, WageSettings};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn period() -> PayPeriod {
        PayPeriod::containing(date(1))
    }

    fn agent(agent_id: &str, hours: i64, sales: &[(i64, &str)]) -> AgentStatement {
        let shifts = vec![Shift {
            id: format!("{agent_id}_shift"),
            date: date(2),
            day_hours: Decimal::from(hours),
            evening_hours: Decimal::ZERO,
            total_sales: 0,
        }];
        let sales: Vec<Sale> = sales
            .iter()
            .enumerate()
            .map(|(i, (amount, project))| Sale {
                id: format!("{agent_id}_sale_{i}"),
                date: date(2),
                timestamp: Utc.with_ymd_and_hms(2025, 4, 2, 12, 0, 0).unwrap(),
                amount: *amount,
                project: project.to_string(),
                sale_type: SaleType::New,
            })
            .collect();
        let statement =
            compute_statement(&shifts, &sales, &WageSettings::default(), &period()).unwrap();
        AgentStatement {
            agent_id: agent_id.to_string(),
            statement,
        }
    }

    #[test]
    fn test_empty_team() {
        let summary = summarize_team(&period(), &[]).unwrap();
        assert_eq!(summary.agent_count, 0);
        assert_eq!(summary.total_sales, 0);
        assert_eq!(summary.sales_per_hour, Decimal::ZERO);
        assert!(summary.agents.is_empty());
    }

    #[test]
    fn test_totals_add_up() {
        let team = vec![
            agent("anna", 8, &[(20_000, "UNICEF")]),
            agent("bjorn", 4, &[(5_000, "Barnaheill"), (3_000, "UNICEF")]),
        ];
        let summary = summarize_team(&period(), &team).unwrap();

        assert_eq!(summary.agent_count, 2);
        assert_eq!(summary.total_hours, Decimal::from(12));
        assert_eq!(summary.total_sales, 28_000);
        assert_eq!(
            summary.total_gross_pay,
            team[0].statement.gross_pay + team[1].statement.gross_pay
        );
        assert_eq!(summary.by_project["UNICEF"].amount, 23_000);
        assert_eq!(summary.by_project["UNICEF"].count, 2);
        assert_eq!(summary.by_project["Barnaheill"].amount, 5_000);
        assert_eq!(summary.sales_per_hour, Decimal::new(233333, 2));
    }

    #[test]
    fn test_agents_ranked_by_sales_then_id() {
        let team = vec![
            agent("carl", 8, &[(1_000, "UNICEF")]),
            agent("anna", 8, &[(9_000, "UNICEF")]),
            agent("bjorn", 8, &[(1_000, "UNICEF")]),
        ];
        let summary = summarize_team(&period(), &team).unwrap();
        let order: Vec<&str> = summary.agents.iter().map(|a| a.agent_id.as_str()).collect();
        assert_eq!(order, vec!["anna", "bjorn", "carl"]);
    }

    #[test]
    fn test_team_sales_overflow_is_a_calculation_error() {
        let mut big = agent("anna", 8, &[(1_000, "UNICEF")]);
        big.statement.period_total_sales = i64::MAX;
        let mut other = agent("bjorn", 8, &[(1_000, "UNICEF")]);
        other.statement.period_total_sales = 1;
        match summarize_team(&period(), &[big, other]) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("team sales total"));
            }
            _ => panic!("Expected CalculationError"),
        }
    }
}
