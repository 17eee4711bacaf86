use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// One user's spend against their monthly target. `remaining` goes negative
/// when the user is over budget and `percentage` keeps climbing past 100;
/// only the progress-bar value is clamped.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BudgetStatus {
    pub user_name: String,
    pub total: Decimal,
    pub target: Decimal,
    pub remaining: Decimal,
    pub percentage: i64,
}

impl BudgetStatus {
    pub fn new(user_name: String, total: Decimal, target: Decimal) -> Self {
        let percentage = if target > Decimal::ZERO {
            (total / target * Decimal::ONE_HUNDRED)
                .round()
                .to_i64()
                .unwrap_or(0)
        } else {
            0
        };

        Self {
            user_name,
            remaining: target - total,
            total,
            target,
            percentage,
        }
    }

    /// Value for a progress bar, clamped to the 0..=100 range.
    pub fn progress(&self) -> i64 {
        self.percentage.clamp(0, 100)
    }
}
