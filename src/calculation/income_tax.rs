//! Tiered progressive income tax.
//!
//! Icelandic withholding tax is marginal: each bracket taxes only the slice of
//! income that falls inside it. The personal allowance is then credited
//! against the bracket tax, and the result is floored at zero.
//!
//! ## 2025 schedule (per pay period)
//!
//! | Bracket | Income (ISK)          | Rate   |
//! |---------|-----------------------|--------|
//! | 1       | 0 - 472,005           | 31.45% |
//! | 2       | 472,005 - 1,273,190   | 37.95% |
//! | 3       | above 1,273,190       | 46.25% |

use rust_decimal::Decimal;

use crate::models::{AuditStep, IncomeTaxBreakdown, TaxBracketLine, WageSettings};

/// One band of the tax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Lower bound of the band, ISK.
    pub lower: Decimal,
    /// Upper bound of the band, `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate inside the band.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Width of the band, `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper.map(|upper| upper - self.lower)
    }
}

/// The 2025 Icelandic income tax brackets, ascending.
pub const TAX_BRACKETS_2025: [TaxBracket; 3] = [
    TaxBracket {
        lower: Decimal::ZERO,
        upper: Some(Decimal::from_parts(472005, 0, 0, false, 0)),
        rate: Decimal::from_parts(3145, 0, 0, false, 4),
    },
    TaxBracket {
        lower: Decimal::from_parts(472005, 0, 0, false, 0),
        upper: Some(Decimal::from_parts(1273190, 0, 0, false, 0)),
        rate: Decimal::from_parts(3795, 0, 0, false, 4),
    },
    TaxBracket {
        lower: Decimal::from_parts(1273190, 0, 0, false, 0),
        upper: None,
        rate: Decimal::from_parts(4625, 0, 0, false, 4),
    },
];

/// Applies the brackets to `taxable_income` and returns the lines touched.
///
/// Negative income is treated as zero and produces no lines.
pub fn bracket_lines(taxable_income: Decimal) -> Vec<TaxBracketLine> {
    let mut lines = Vec::new();
    let mut remaining = taxable_income.max(Decimal::ZERO);

    for (index, bracket) in TAX_BRACKETS_2025.iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let portion = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };

        lines.push(TaxBracketLine {
            bracket: index as u32 + 1,
            lower: bracket.lower,
            upper: bracket.upper,
            rate: bracket.rate,
            taxable_amount: portion,
            tax: portion * bracket.rate,
        });

        remaining -= portion;
    }

    lines
}

/// Bracket tax on `taxable_income` before any personal allowance.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::bracket_tax;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(bracket_tax(Decimal::ZERO), Decimal::ZERO);
/// assert_eq!(
///     bracket_tax(Decimal::from(472_005)),
///     Decimal::from_str("148445.5725").unwrap()
/// );
/// ```
pub fn bracket_tax(taxable_income: Decimal) -> Decimal {
    bracket_lines(taxable_income).iter().map(|line| line.tax).sum()
}

/// Bracket tax less `allowance_credit`, floored at zero.
pub fn income_tax(taxable_income: Decimal, allowance_credit: Decimal) -> Decimal {
    (bracket_tax(taxable_income) - allowance_credit).max(Decimal::ZERO)
}

/// The result of the income tax step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Itemized tax.
    pub breakdown: IncomeTaxBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes itemized income tax for `taxable_income` under `settings`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::models::WageSettings;
/// use rust_decimal::Decimal;
///
/// let result = calculate_income_tax(Decimal::from(1_500_000), &WageSettings::default(), 1);
/// assert_eq!(result.breakdown.brackets.len(), 3);
/// assert!(result.breakdown.tax < result.breakdown.gross_tax);
/// ```
pub fn calculate_income_tax(
    taxable_income: Decimal,
    settings: &WageSettings,
    step_number: u32,
) -> IncomeTaxResult {
    let brackets = bracket_lines(taxable_income);
    let gross_tax: Decimal = brackets.iter().map(|line| line.tax).sum();
    let allowance_credit = settings.allowance_credit();
    let tax = (gross_tax - allowance_credit).max(Decimal::ZERO);

    let bracket_summary: Vec<String> = brackets
        .iter()
        .map(|line| {
            format!(
                "{} x {}% = {}",
                line.taxable_amount.normalize(),
                (line.rate * Decimal::ONE_HUNDRED).normalize(),
                line.tax.normalize()
            )
        })
        .collect();

    let reasoning = if brackets.is_empty() {
        "No taxable income".to_string()
    } else {
        format!(
            "{}; gross tax {} less personal allowance {} = {}",
            bracket_summary.join(", "),
            gross_tax.normalize(),
            allowance_credit.normalize(),
            tax.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "personal_allowance": settings.personal_allowance.normalize().to_string(),
            "allowance_usage": settings.allowance_usage.normalize().to_string()
        }),
        output: serde_json::json!({
            "brackets_applied": brackets.len(),
            "gross_tax": gross_tax.normalize().to_string(),
            "allowance_credit": allowance_credit.normalize().to_string(),
            "tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        breakdown: IncomeTaxBreakdown {
            taxable_income,
            brackets,
            gross_tax,
            allowance_credit,
            tax,
        },
        audit_step,
    }
}
