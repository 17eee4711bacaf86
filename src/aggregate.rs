use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::models::budget::BudgetStatus;
use crate::models::expense::ExpenseRecord;
use crate::models::stats::{CategorySummary, SpendingSummary};

/// Half-open wall-clock window `[start, end)` covering one calendar month in
/// a fixed timezone. Both boundaries sit at local midnight of day 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    tz: Tz,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl MonthWindow {
    /// Window of the month containing `reference`, as seen from `tz`.
    pub fn containing(reference: DateTime<Utc>, tz: Tz) -> Self {
        let local = reference.with_timezone(&tz).date_naive();
        // Day 1 of the month of a real date always exists.
        Self::for_month(local.year(), local.month(), tz).unwrap()
    }

    /// Window for an explicit year/month. None when the month is invalid.
    pub fn for_month(year: i32, month: u32, tz: Tz) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };

        Some(Self {
            tz,
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        })
    }

    /// Whether `instant` falls inside the window. The instant is converted
    /// into the window's timezone first, so the comparison happens between
    /// two readings of the same local clock. Comparing UTC fields against
    /// local boundaries goes wrong by up to a day near month edges.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.tz).naive_local();
        self.start <= local && local < self.end
    }

    /// "YYYY-MM" label of the window's month.
    pub fn label(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }
}

/// Amount of `record` if it counts toward `window` (optionally for a single
/// user). Rows without a usable timestamp or with a negative amount are
/// data-quality problems: skipped with a warning, never fatal.
fn attributable(record: &ExpenseRecord, window: &MonthWindow, user: Option<&str>) -> Option<Decimal> {
    if let Some(user) = user {
        if record.user_name != user {
            return None;
        }
    }

    let Some(created_at) = record.created_at else {
        tracing::warn!(id = record.id, "expense row without created_at, skipped");
        return None;
    };

    if record.amount < Decimal::ZERO {
        tracing::warn!(id = record.id, "expense row with negative amount, skipped");
        return None;
    }

    window.contains(created_at).then_some(record.amount)
}

/// Per-user spend inside the month containing `reference`, measured against
/// the configured targets. Pure: the caller injects the reference instant,
/// and the window is computed exactly once for the whole pass.
///
/// Users listed in `targets` but absent from `records` come back with a zero
/// total; records from users outside `targets` are ignored.
pub fn compute_monthly_totals(
    records: &[ExpenseRecord],
    targets: &BTreeMap<String, Decimal>,
    reference: DateTime<Utc>,
    tz: Tz,
) -> Vec<BudgetStatus> {
    let window = MonthWindow::containing(reference, tz);

    let mut totals: BTreeMap<&str, Decimal> = targets
        .keys()
        .map(|user| (user.as_str(), Decimal::ZERO))
        .collect();

    for record in records {
        let Some(total) = totals.get_mut(record.user_name.as_str()) else {
            continue; // not a tracked participant
        };
        if let Some(amount) = attributable(record, &window, None) {
            *total += amount;
        }
    }

    targets
        .iter()
        .map(|(user, target)| {
            let total = totals.get(user.as_str()).copied().unwrap_or(Decimal::ZERO);
            BudgetStatus::new(user.clone(), total, *target)
        })
        .collect()
}

/// Total, per-entry average, and entry count for a month window, optionally
/// restricted to one user.
pub fn spending_summary(
    records: &[ExpenseRecord],
    window: &MonthWindow,
    user: Option<&str>,
) -> SpendingSummary {
    let mut total = Decimal::ZERO;
    let mut count = 0i64;

    for record in records {
        if let Some(amount) = attributable(record, window, user) {
            total += amount;
            count += 1;
        }
    }

    let average = if count > 0 {
        (total / Decimal::from(count)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    SpendingSummary {
        total,
        average,
        count,
    }
}

/// Per-category totals and their share of the month's spend, largest first.
/// The category set is open: whatever `description` values appear in the
/// rows become the buckets.
pub fn category_breakdown(
    records: &[ExpenseRecord],
    window: &MonthWindow,
    user: Option<&str>,
) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut grand_total = Decimal::ZERO;

    for record in records {
        if let Some(amount) = attributable(record, window, user) {
            *by_category
                .entry(record.description.as_str())
                .or_insert(Decimal::ZERO) += amount;
            grand_total += amount;
        }
    }

    let mut breakdown: Vec<CategorySummary> = by_category
        .into_iter()
        .map(|(category, total)| {
            let percentage = if grand_total > Decimal::ZERO {
                (total / grand_total * Decimal::ONE_HUNDRED).round_dp(2)
            } else {
                Decimal::ZERO
            };
            CategorySummary {
                category: category.to_string(),
                total,
                percentage,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    breakdown
}
