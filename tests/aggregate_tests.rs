// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salesboard::aggregate::{TOTAL_LABEL, aggregate, project};
use salesboard::error::ReportError;
use salesboard::models::{Product, Profile, ReportingPeriod, SaleRecord, SalespersonTarget, Status};
use salesboard::utils::percent;

fn sale(who: &str, status: Status, profile: Profile, amount: i64) -> SaleRecord {
    SaleRecord {
        salesperson: who.into(),
        status,
        product: Product::CardNoWithdrawal,
        origin: "URA".into(),
        species: "APOSENTADORIA".into(),
        bank: "BMG".into(),
        amount: Decimal::new(amount, 0),
        date: NaiveDate::from_ymd_opt(2025, 2, 3),
        profile,
    }
}

fn many(n: usize, who: &str, status: Status, profile: Profile) -> Vec<SaleRecord> {
    (0..n).map(|_| sale(who, status.clone(), profile, 100)).collect()
}

fn target(who: &str, quota: u32) -> SalespersonTarget {
    SalespersonTarget {
        salesperson: who.into(),
        card_quota: quota,
        withdrawal_quota: Decimal::ZERO,
        start_date: None,
        active: true,
    }
}

fn period(days: u32, business: u32, remaining: u32) -> ReportingPeriod {
    ReportingPeriod {
        days_elapsed: days,
        business_days_elapsed: business,
        business_days_remaining: remaining,
    }
}

#[test]
fn single_seller_end_to_end() {
    let mut records = many(30, "Alice", Status::Paid, Profile::Current);
    records.extend(many(10, "Alice", Status::AwaitingApproval, Profile::Current));
    records.extend(many(5, "Alice", Status::Blocked, Profile::Current));
    records.extend(many(5, "Alice", Status::Pending, Profile::Current));

    let report = aggregate(&records, &[target("Alice", 60)], &period(10, 8, 12)).unwrap();
    assert_eq!(report.rows.len(), 1);
    let a = &report.rows[0];
    assert_eq!(a.paid_count, 30);
    assert_eq!(a.awaiting_count, 10);
    assert_eq!(a.blocked_count, 5);
    assert_eq!(a.pending_count, 5);
    assert_eq!(a.typed_count, 50);
    assert_eq!(a.accepted_count, 45);
    assert_eq!(a.conversion_rate, Decimal::new(9, 1));
    assert_eq!(a.projected_count, 32);
    assert_eq!(percent(a.attainment_rate), 53);
    assert_eq!(a.amount_paid, Decimal::new(3000, 0));

    assert_eq!(report.total.salesperson, TOTAL_LABEL);
    assert_eq!(report.total.accepted_count, 45);
    assert!(!report.total.active);
    assert!(report.dropped.is_empty());

    // 60 quota - 40 paid/awaiting over 12 business days remaining
    let goal = report.daily_goal.unwrap();
    assert_eq!(goal.cards_per_day, 2);
    assert_eq!(goal.per_seller, Decimal::new(2, 0));
}

#[test]
fn total_rates_are_pooled_not_averaged() {
    let mut records = vec![sale("A", Status::Paid, Profile::Current, 10)];
    records.extend(many(100, "B", Status::Pending, Profile::Current));
    let roster = [target("A", 10), target("B", 10)];

    let report = aggregate(&records, &roster, &period(5, 5, 5)).unwrap();
    let a = report.rows.iter().find(|r| r.salesperson == "A").unwrap();
    let b = report.rows.iter().find(|r| r.salesperson == "B").unwrap();
    assert_eq!(a.conversion_rate, Decimal::ONE);
    assert_eq!(b.conversion_rate, Decimal::ZERO);
    assert_eq!(report.total.typed_count, 101);
    assert_eq!(report.total.accepted_count, 1);
    assert_eq!(
        report.total.conversion_rate,
        Decimal::ONE / Decimal::new(101, 0)
    );
    assert_eq!(report.total.card_quota, 20);
}

#[test]
fn pending_counts_current_profile_and_every_cancellation() {
    let records = vec![
        sale("A", Status::Pending, Profile::Current, 0),
        sale("A", Status::Pending, Profile::Other, 0),
        sale("A", Status::Cancelled, Profile::Other, 0),
        sale("A", Status::Cancelled, Profile::Current, 0),
    ];
    let report = aggregate(&records, &[target("A", 10)], &period(1, 1, 1)).unwrap();
    assert_eq!(report.rows[0].pending_count, 3);
    assert_eq!(report.rows[0].typed_count, 3);
    assert_eq!(report.headline.pending_count, 3);
}

#[test]
fn payout_statuses_are_not_accepted() {
    let records = vec![
        sale("A", Status::PaidPayout, Profile::Current, 500),
        sale("A", Status::AwaitingPayout, Profile::Current, 500),
        sale("A", Status::Unknown("EM ANÁLISE".into()), Profile::Current, 0),
    ];
    let report = aggregate(&records, &[target("A", 10)], &period(3, 2, 5)).unwrap();
    let a = &report.rows[0];
    assert_eq!(a.accepted_count, 0);
    assert_eq!(a.typed_count, 0);
    assert_eq!(a.amount_paid, Decimal::ZERO);
    assert_eq!(report.headline, Default::default());
}

#[test]
fn zero_denominators_yield_zero_rates() {
    let mut roster = vec![target("A", 10), target("B", 0)];
    roster[1].active = false;
    let records = many(4, "B", Status::Paid, Profile::Current);

    let report = aggregate(&records, &roster, &period(2, 2, 0)).unwrap();
    let a = report.rows.iter().find(|r| r.salesperson == "A").unwrap();
    assert_eq!(a.typed_count, 0);
    assert_eq!(a.conversion_rate, Decimal::ZERO);
    assert_eq!(a.attainment_rate, Decimal::ZERO);

    let b = report.rows.iter().find(|r| r.salesperson == "B").unwrap();
    assert_eq!(b.projected_count, 4);
    assert_eq!(b.attainment_rate, Decimal::ZERO);
    assert!(report.daily_goal.is_none());
}

#[test]
fn missing_reporting_parameters_abort() {
    let err = aggregate(&[], &[target("A", 10)], &period(0, 5, 5)).unwrap_err();
    assert_eq!(err, ReportError::MissingReportingParameter("days_elapsed"));

    let err = aggregate(&[], &[target("A", 0)], &period(3, 5, 5)).unwrap_err();
    assert_eq!(err, ReportError::MissingReportingParameter("card_quota"));
}

#[test]
fn empty_ledger_is_a_valid_report() {
    let report = aggregate(&[], &[target("A", 10), target("B", 5)], &period(3, 2, 4)).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert!(report.rows.iter().all(|r| r.typed_count == 0));
    assert_eq!(report.total.card_quota, 15);
    assert_eq!(report.total.conversion_rate, Decimal::ZERO);
    // 15 cards over 4 days rounds to 4, split across two sellers
    let goal = report.daily_goal.unwrap();
    assert_eq!(goal.cards_per_day, 4);
    assert_eq!(goal.per_seller, Decimal::new(2, 0));
}

#[test]
fn sellers_off_roster_are_reported_not_counted() {
    let mut records = many(3, "A", Status::Paid, Profile::Current);
    records.extend(many(2, "Ghost", Status::Paid, Profile::Current));
    records.push(sale("Zed", Status::Blocked, Profile::Current, 0));

    let report = aggregate(&records, &[target("A", 10)], &period(3, 3, 3)).unwrap();
    assert_eq!(report.total.paid_count, 3);
    let names: Vec<&str> = report.dropped.iter().map(|d| d.salesperson.as_str()).collect();
    assert_eq!(names, vec!["Ghost", "Zed"]);
    assert_eq!(report.dropped_records(), 3);
    // Organisation cards still see every record
    assert_eq!(report.headline.paid_count, 5);
    assert_eq!(report.headline.blocked_count, 1);
}

#[test]
fn rows_sort_by_accepted_then_name() {
    let mut records = many(2, "Carla", Status::Paid, Profile::Current);
    records.extend(many(5, "Bruno", Status::Blocked, Profile::Current));
    records.extend(many(2, "Ana", Status::AwaitingApproval, Profile::Current));
    let roster = [target("Ana", 5), target("Bruno", 5), target("Carla", 5), target("Davi", 5)];

    let report = aggregate(&records, &roster, &period(4, 4, 4)).unwrap();
    let order: Vec<&str> = report.rows.iter().map(|r| r.salesperson.as_str()).collect();
    assert_eq!(order, vec!["Bruno", "Ana", "Carla", "Davi"]);
}

#[test]
fn duplicate_roster_entries_keep_the_first() {
    let roster = [target("A", 10), target("A", 99)];
    let report = aggregate(&many(1, "A", Status::Paid, Profile::Current), &roster, &period(1, 1, 1)).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].card_quota, 10);
}

#[test]
fn projection_rounds_half_up() {
    // 5 per 2 days over 5 business days = 12.5
    assert_eq!(project(5, &period(2, 5, 0)), 13);
    assert_eq!(project(0, &period(2, 5, 0)), 0);
    assert_eq!(project(7, &period(0, 5, 0)), 0);
}
