// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use salesboard::commission::{CommissionRates, Deductions, commission_breakdown, revenue_projection};
use salesboard::models::{Product, Profile, SaleRecord, Status};

fn sale(status: Status, product: Product, amount: i64) -> SaleRecord {
    SaleRecord {
        salesperson: "Ana".into(),
        status,
        product,
        origin: "URA".into(),
        species: "APOSENTADORIA".into(),
        bank: "BMG".into(),
        amount: Decimal::new(amount, 0),
        date: None,
        profile: Profile::Current,
    }
}

fn dec(v: i64) -> Decimal {
    Decimal::new(v, 0)
}

#[test]
fn buckets_follow_status_and_product() {
    let records = vec![
        sale(Status::Paid, Product::CardWithWithdrawal, 1000),
        sale(Status::Paid, Product::CardWithWithdrawal, 500),
        sale(Status::Paid, Product::CardNoWithdrawal, 0),
        sale(Status::PaidPayout, Product::SupplementaryWithdrawal, 2000),
        sale(Status::PaidPayout, Product::FreeMargin, 1000),
        sale(Status::AwaitingApproval, Product::CardWithWithdrawal, 800),
        sale(Status::Blocked, Product::CardNoWithdrawal, 0),
        sale(Status::AwaitingPayout, Product::FreeMargin, 100),
        // Not commissionable
        sale(Status::Pending, Product::CardWithWithdrawal, 9999),
        sale(Status::Cancelled, Product::CardNoWithdrawal, 0),
    ];
    let c = commission_breakdown(&records, &CommissionRates::default());

    let realised: Vec<Decimal> = c.realised.iter().map(|l| l.commission).collect();
    assert_eq!(realised, vec![dec(900), dec(150), dec(200), dec(70), dec(0)]);
    assert_eq!(c.realised[0].base, dec(3));
    assert_eq!(c.realised_subtotal, dec(1320));

    let expected: Vec<Decimal> = c.expected.iter().map(|l| l.commission).collect();
    assert_eq!(
        expected,
        vec![dec(300), dec(80), dec(300), dec(0), dec(0), dec(7), dec(60)]
    );
    assert_eq!(c.expected_subtotal, dec(747));
    assert_eq!(c.total, dec(2067));
    assert_eq!(c.realised[1].reference, "10%");
    assert_eq!(c.realised[0].reference, "R$ 300");
}

#[test]
fn awaiting_withdrawal_uses_awaiting_records_only() {
    let records = vec![
        sale(Status::Paid, Product::CardWithWithdrawal, 5000),
        sale(Status::AwaitingApproval, Product::CardWithWithdrawal, 300),
    ];
    let c = commission_breakdown(&records, &CommissionRates::default());
    let line = c
        .expected
        .iter()
        .find(|l| l.label == "Awaiting approval - withdrawal")
        .unwrap();
    assert_eq!(line.base, dec(300));
    assert_eq!(line.commission, dec(30));
}

#[test]
fn empty_ledger_has_zero_commission() {
    let c = commission_breakdown(&[], &CommissionRates::default());
    assert_eq!(c.total, Decimal::ZERO);
}

#[test]
fn net_projection_subtracts_every_deduction() {
    let r = revenue_projection(dec(100_000), &Deductions::default());
    assert_eq!(r.gross, dec(100_000));
    assert_eq!(r.deductions[0].value, dec(-16_000));
    assert_eq!(r.deductions[1].value, dec(-15_000));
    let benefit = r.deductions.iter().find(|l| l.label == "Benefit unlock").unwrap();
    assert_eq!(benefit.value, dec(-13_268));
    assert_eq!(r.net, dec(-15_085));
}

#[test]
fn custom_deductions_apply() {
    let d = Deductions {
        tax_rate: Decimal::new(10, 2),
        staff_bonus_rate: Decimal::ZERO,
        campaign: Decimal::ZERO,
        admin_overhead: dec(100),
        payroll_overhead: Decimal::ZERO,
        sms_campaign: dec(50),
        whatsapp_campaign: dec(25),
        benefit_unlock: Vec::new(),
    };
    let r = revenue_projection(dec(1000), &d);
    assert_eq!(r.net, dec(725));
}
