#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::aggregate::{category_breakdown, compute_monthly_totals, spending_summary, MonthWindow};
use crate::models::expense::ExpenseRecord;

const CHICAGO: Tz = chrono_tz::America::Chicago;

fn instant(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

fn record(id: i32, user_name: &str, amount: Decimal, created_at: &str) -> ExpenseRecord {
    ExpenseRecord {
        id,
        user_name: user_name.to_string(),
        amount,
        description: "food".to_string(),
        memo: None,
        created_at: Some(instant(created_at)),
    }
}

fn targets(pairs: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    pairs
        .iter()
        .map(|(user, target)| (user.to_string(), *target))
        .collect()
}

// ── compute_monthly_totals ─────────────────────────────────────

#[test]
fn test_empty_records_yield_zero_totals() {
    let targets = targets(&[("Chaerin", dec!(800.00)), ("Nayun", dec!(1000.00))]);
    let statuses =
        compute_monthly_totals(&[], &targets, instant("2024-03-15T12:00:00Z"), Tz::UTC);

    assert_eq!(statuses.len(), 2);
    for status in &statuses {
        assert_eq!(status.total, Decimal::ZERO);
        assert_eq!(status.remaining, status.target);
        assert_eq!(status.percentage, 0);
    }
}

#[test]
fn test_month_boundary_is_half_open_in_local_time() {
    let targets = targets(&[("Nayun", dec!(100))]);
    let reference = instant("2024-03-01T00:00:00-06:00");
    let records = vec![
        // One second before local midnight of March 1 in Chicago: February.
        record(1, "Nayun", dec!(10), "2024-02-29T23:59:59-06:00"),
        // Exactly at the boundary: March.
        record(2, "Nayun", dec!(25), "2024-03-01T00:00:00-06:00"),
    ];

    let statuses = compute_monthly_totals(&records, &targets, reference, CHICAGO);
    assert_eq!(statuses[0].total, dec!(25));
}

#[test]
fn test_utc_instant_attributed_after_zone_conversion() {
    // 2024-03-01T04:30:00Z is still 2024-02-29 22:30 in Chicago.
    let targets = targets(&[("Nayun", dec!(100))]);
    let records = vec![record(1, "Nayun", dec!(40), "2024-03-01T04:30:00Z")];

    let march = compute_monthly_totals(&records, &targets, instant("2024-03-15T12:00:00Z"), CHICAGO);
    assert_eq!(march[0].total, Decimal::ZERO);

    let february =
        compute_monthly_totals(&records, &targets, instant("2024-02-15T12:00:00Z"), CHICAGO);
    assert_eq!(february[0].total, dec!(40));
}

#[test]
fn test_unknown_user_is_ignored() {
    let targets = targets(&[("Nayun", dec!(100))]);
    let records = vec![
        record(1, "Nayun", dec!(30), "2024-03-05T12:00:00Z"),
        record(2, "Stranger", dec!(99), "2024-03-05T12:00:00Z"),
    ];

    let statuses =
        compute_monthly_totals(&records, &targets, instant("2024-03-15T12:00:00Z"), Tz::UTC);
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].user_name, "Nayun");
    assert_eq!(statuses[0].total, dec!(30));
}

#[test]
fn test_zero_target_never_divides() {
    let targets = targets(&[("Nayun", dec!(0))]);
    let records = vec![record(1, "Nayun", dec!(30), "2024-03-05T12:00:00Z")];

    let statuses =
        compute_monthly_totals(&records, &targets, instant("2024-03-15T12:00:00Z"), Tz::UTC);
    assert_eq!(statuses[0].percentage, 0);
    assert_eq!(statuses[0].remaining, dec!(-30));
}

#[test]
fn test_totals_are_additive_over_disjoint_sets() {
    let targets = targets(&[("Nayun", dec!(500))]);
    let reference = instant("2024-03-15T12:00:00Z");
    let set_a = vec![
        record(1, "Nayun", dec!(12.50), "2024-03-02T09:00:00Z"),
        record(2, "Nayun", dec!(7.25), "2024-03-09T18:30:00Z"),
    ];
    let set_b = vec![record(3, "Nayun", dec!(80.00), "2024-03-21T07:45:00Z")];

    let total_a = compute_monthly_totals(&set_a, &targets, reference, Tz::UTC)[0].total;
    let total_b = compute_monthly_totals(&set_b, &targets, reference, Tz::UTC)[0].total;

    let mut both = set_a;
    both.extend(set_b);
    let total_both = compute_monthly_totals(&both, &targets, reference, Tz::UTC)[0].total;

    assert_eq!(total_both, total_a + total_b);
}

#[test]
fn test_worked_scenario() {
    let targets = targets(&[("A", dec!(800.00)), ("B", dec!(1000.00))]);
    let records = vec![
        record(1, "A", dec!(250.00), "2024-03-05T12:00:00Z"),
        record(2, "B", dec!(900.00), "2024-03-20T12:00:00Z"),
        record(3, "A", dec!(50.00), "2024-02-15T12:00:00Z"),
    ];

    let statuses =
        compute_monthly_totals(&records, &targets, instant("2024-03-31T23:00:00Z"), Tz::UTC);

    let a = &statuses[0];
    assert_eq!(a.user_name, "A");
    assert_eq!(a.total, dec!(250.00));
    assert_eq!(a.remaining, dec!(550.00));
    assert_eq!(a.percentage, 31);

    let b = &statuses[1];
    assert_eq!(b.user_name, "B");
    assert_eq!(b.total, dec!(900.00));
    assert_eq!(b.remaining, dec!(100.00));
    assert_eq!(b.percentage, 90);
}

#[test]
fn test_over_budget_keeps_raw_percentage() {
    let targets = targets(&[("Nayun", dec!(100))]);
    let records = vec![record(1, "Nayun", dec!(250), "2024-03-05T12:00:00Z")];

    let statuses =
        compute_monthly_totals(&records, &targets, instant("2024-03-15T12:00:00Z"), Tz::UTC);
    assert_eq!(statuses[0].remaining, dec!(-150));
    assert_eq!(statuses[0].percentage, 250);
    assert_eq!(statuses[0].progress(), 100);
}

#[test]
fn test_missing_timestamp_skipped_not_fatal() {
    let targets = targets(&[("Nayun", dec!(100))]);
    let mut broken = record(1, "Nayun", dec!(99), "2024-03-05T12:00:00Z");
    broken.created_at = None;
    let records = vec![broken, record(2, "Nayun", dec!(15), "2024-03-06T12:00:00Z")];

    let statuses =
        compute_monthly_totals(&records, &targets, instant("2024-03-15T12:00:00Z"), Tz::UTC);
    assert_eq!(statuses[0].total, dec!(15));
}

#[test]
fn test_negative_amount_skipped_and_zero_tolerated() {
    let targets = targets(&[("Nayun", dec!(100))]);
    let records = vec![
        record(1, "Nayun", dec!(-20), "2024-03-05T12:00:00Z"),
        record(2, "Nayun", dec!(0), "2024-03-06T12:00:00Z"),
        record(3, "Nayun", dec!(45), "2024-03-07T12:00:00Z"),
    ];

    let statuses =
        compute_monthly_totals(&records, &targets, instant("2024-03-15T12:00:00Z"), Tz::UTC);
    assert_eq!(statuses[0].total, dec!(45));
}

// ── MonthWindow ────────────────────────────────────────────────

#[test]
fn test_december_rolls_over_to_january() {
    let window = MonthWindow::containing(instant("2024-12-15T12:00:00Z"), Tz::UTC);
    assert_eq!(window.label(), "2024-12");
    assert!(window.contains(instant("2024-12-31T23:59:59Z")));
    assert!(!window.contains(instant("2025-01-01T00:00:00Z")));
}

#[test]
fn test_for_month_rejects_invalid_month() {
    assert!(MonthWindow::for_month(2024, 13, Tz::UTC).is_none());
    assert!(MonthWindow::for_month(2024, 0, Tz::UTC).is_none());
}

#[test]
fn test_window_boundaries_follow_the_zone() {
    // March in Chicago starts at 06:00 UTC.
    let window = MonthWindow::for_month(2024, 3, CHICAGO).unwrap();
    assert!(!window.contains(instant("2024-03-01T05:59:59Z")));
    assert!(window.contains(instant("2024-03-01T06:00:00Z")));
}

// ── statistics derivations ─────────────────────────────────────

fn categorized(id: i32, user_name: &str, amount: Decimal, category: &str) -> ExpenseRecord {
    ExpenseRecord {
        description: category.to_string(),
        ..record(id, user_name, amount, "2024-03-10T12:00:00Z")
    }
}

#[test]
fn test_spending_summary_counts_and_averages() {
    let window = MonthWindow::for_month(2024, 3, Tz::UTC).unwrap();
    let records = vec![
        record(1, "Nayun", dec!(10.00), "2024-03-01T08:00:00Z"),
        record(2, "Nayun", dec!(20.00), "2024-03-11T08:00:00Z"),
        record(3, "Nayun", dec!(25.00), "2024-03-21T08:00:00Z"),
        record(4, "Nayun", dec!(99.00), "2024-04-01T08:00:00Z"),
    ];

    let summary = spending_summary(&records, &window, None);
    assert_eq!(summary.total, dec!(55.00));
    assert_eq!(summary.count, 3);
    assert_eq!(summary.average, dec!(18.33));
}

#[test]
fn test_spending_summary_empty_window() {
    let window = MonthWindow::for_month(2024, 3, Tz::UTC).unwrap();
    let summary = spending_summary(&[], &window, None);
    assert_eq!(summary.total, Decimal::ZERO);
    assert_eq!(summary.average, Decimal::ZERO);
    assert_eq!(summary.count, 0);
}

#[test]
fn test_category_breakdown_orders_by_total_then_name() {
    let window = MonthWindow::for_month(2024, 3, Tz::UTC).unwrap();
    let records = vec![
        categorized(1, "Nayun", dec!(40.00), "cafe"),
        categorized(2, "Nayun", dec!(60.00), "food"),
        categorized(3, "Chaerin", dec!(40.00), "bus fare home"), // free text stays a bucket
    ];

    let breakdown = category_breakdown(&records, &window, None);
    assert_eq!(breakdown.len(), 3);
    assert_eq!(breakdown[0].category, "food");
    assert_eq!(breakdown[0].percentage, dec!(42.86));
    assert_eq!(breakdown[1].category, "bus fare home");
    assert_eq!(breakdown[2].category, "cafe");
}

#[test]
fn test_category_breakdown_user_filter() {
    let window = MonthWindow::for_month(2024, 3, Tz::UTC).unwrap();
    let records = vec![
        categorized(1, "Nayun", dec!(30.00), "food"),
        categorized(2, "Chaerin", dec!(70.00), "cafe"),
    ];

    let breakdown = category_breakdown(&records, &window, Some("Nayun"));
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].category, "food");
    assert_eq!(breakdown[0].total, dec!(30.00));
    assert_eq!(breakdown[0].percentage, dec!(100.00));
}
