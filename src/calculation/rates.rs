//! Fixed statutory rates and engine constants.
//!
//! These are system-wide and deliberately not part of [`WageSettings`](crate::models::WageSettings).

use rust_decimal::Decimal;

/// Employee pension fund contribution (lífeyrissjóður), 4% of gross pay.
pub const PENSION_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// Union dues (stéttarfélagsgjald), 0.7% of gross pay.
pub const UNION_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 3);

/// Vacation pay accrual (orlof), 10.17% of wages plus bonus.
pub const VACATION_RATE: Decimal = Decimal::from_parts(1017, 0, 0, false, 4);

/// Sales an agent must make per effective hour before earning a bonus, ISK.
pub const BONUS_THRESHOLD_PER_HOUR: Decimal = Decimal::from_parts(636, 0, 0, false, 0);

/// Share of worked hours counted as effective (7.5 unpaid minutes per hour).
pub const EFFECTIVE_HOURS_MULTIPLIER: Decimal = Decimal::from_parts(875, 0, 0, false, 3);
