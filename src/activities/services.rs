use rust_decimal::Decimal;

use crate::error::AppError;

use super::repo::Activity;

/// Exact decimal sum of the activities' costs, starting from an exact
/// zero. An empty slice yields zero.
pub fn total_cost(activities: &[Activity]) -> Decimal {
    activities
        .iter()
        .fold(Decimal::ZERO, |acc, activity| acc + activity.cost)
}

/// Cost is a monetary value; a negative sign is a malformed request,
/// rejected before any write.
pub fn check_cost(cost: Decimal) -> Result<(), AppError> {
    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(AppError::validation("cost must not be negative"));
    }
    Ok(())
}
