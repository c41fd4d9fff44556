// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salesboard::aggregate::aggregate;
use salesboard::commission::{CommissionRates, commission_breakdown};
use salesboard::error::{IssueKind, ReportError};
use salesboard::models::{
    AcceptanceStatus, Product, Profile, RawTable, ReportingPeriod, SalespersonTarget, Status,
};
use salesboard::normalize::{NormalizeOptions, collapse_to_bucket, normalize_ledger, reporting_period};
use salesboard::utils::parse_currency;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn opts() -> NormalizeOptions {
    NormalizeOptions {
        cutoff: d(2025, 1, 30),
        bucket: d(2025, 1, 31),
    }
}

fn table(rows: &[&[&str]]) -> RawTable {
    let header = ["Vendedor", "Status", "Produto", "Origem", "Valor", "Data", "Perfil", "Ajuda"];
    RawTable {
        header: header.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

#[test]
fn currency_parses_brazilian_format() {
    assert_eq!(parse_currency("R$ 1.234,56"), Decimal::new(123456, 2));
    assert_eq!(parse_currency(" R$ 2.000 "), Decimal::new(2000, 0));
    assert_eq!(parse_currency("15,5"), Decimal::new(155, 1));
}

#[test]
fn malformed_currency_is_zero() {
    for s in ["", "   ", "R$", "abc", "R$ -", "1,2,3", "--5", "R$ -100,00", "12a"] {
        assert_eq!(parse_currency(s), Decimal::ZERO, "input {:?}", s);
    }
}

#[test]
fn dates_at_or_before_cutoff_collapse_to_bucket() {
    let o = opts();
    assert_eq!(collapse_to_bucket(d(2025, 1, 30), o.cutoff, o.bucket), o.bucket);
    assert_eq!(collapse_to_bucket(d(2024, 12, 2), o.cutoff, o.bucket), o.bucket);
    assert_eq!(collapse_to_bucket(d(2025, 1, 31), o.cutoff, o.bucket), d(2025, 1, 31));
    assert_eq!(collapse_to_bucket(d(2025, 2, 3), o.cutoff, o.bucket), d(2025, 2, 3));
}

#[test]
fn ledger_rows_become_typed_records_in_order() {
    let t = table(&[
        &["ANNA", "PAGO", "Cartão com Saque", "URA", "R$ 1.500,00", "03/02/2025", "ATUAL", "10"],
        &["JOAO", "PENDENTE", "Cartão sem Saque", "SMS", "", "15/01/2025", "NOVO", "8"],
        &["ANNA", "AG. INSS_", "Margem Livre", "REDE", "300", "04/02/2025", "ATUAL", "12"],
    ]);
    let ledger = normalize_ledger(&t, &opts()).unwrap();
    assert_eq!(ledger.records.len(), 3);
    assert!(ledger.issues.is_empty());

    let a = &ledger.records[0];
    assert_eq!(a.salesperson, "ANNA");
    assert_eq!(a.status, Status::Paid);
    assert_eq!(a.product, Product::CardWithWithdrawal);
    assert_eq!(a.amount, Decimal::new(1500, 0));
    assert_eq!(a.date, Some(d(2025, 2, 3)));
    assert_eq!(a.profile, Profile::Current);
    assert_eq!(a.acceptance_status(), AcceptanceStatus::Accepted);

    let j = &ledger.records[1];
    assert_eq!(j.amount, Decimal::ZERO);
    assert_eq!(j.date, Some(d(2025, 1, 31)));
    assert_eq!(j.profile, Profile::Other);
    assert!(!j.is_attrition());

    assert_eq!(ledger.records[2].status, Status::AwaitingPayout);
    assert_eq!(
        ledger.records[2].acceptance_status(),
        AcceptanceStatus::PendingAcceptance
    );
}

#[test]
fn bad_cells_are_recovered_and_reported() {
    let t = table(&[
        &["ANNA", "EM ANÁLISE", "Consórcio", "URA", "R$ abc", "32/01/2025", "ATUAL"],
        &["JOAO", "CANCELADO", "Cartão sem Saque", "URA", "10"],
    ]);
    let ledger = normalize_ledger(&t, &opts()).unwrap();
    assert_eq!(ledger.records.len(), 2);

    let r = &ledger.records[0];
    assert_eq!(r.status, Status::Unknown("EM ANÁLISE".into()));
    assert_eq!(r.product, Product::Unknown("Consórcio".into()));
    assert_eq!(r.amount, Decimal::ZERO);
    assert_eq!(r.date, None);

    // Short row: missing date cell is unreadable, record still kept
    assert_eq!(ledger.records[1].date, None);
    assert!(ledger.records[1].is_attrition());

    assert_eq!(ledger.issues_of(IssueKind::UnknownEnumValue).count(), 2);
    assert_eq!(ledger.issues_of(IssueKind::MalformedAmount).count(), 1);
    let dates: Vec<usize> = ledger
        .issues_of(IssueKind::MalformedDate)
        .map(|i| i.row)
        .collect();
    assert_eq!(dates, vec![0, 1]);
}

#[test]
fn missing_salesperson_column_fails_ledger() {
    let t = RawTable {
        header: vec!["Status".into(), "Valor".into()],
        rows: vec![vec!["PAGO".into(), "1".into()]],
    };
    let err = normalize_ledger(&t, &opts()).unwrap_err();
    assert_eq!(err, ReportError::MissingColumn("Vendedor".into()));
}

#[test]
fn reporting_period_comes_from_helper_column() {
    let t = table(&[
        &["A", "PAGO", "", "", "", "", "", " 12 "],
        &["A", "PAGO", "", "", "", "", "", "9"],
        &["A", "PAGO", "", "", "", "", "", "11"],
    ]);
    let p = reporting_period(&t).unwrap();
    assert_eq!(p.days_elapsed, 12);
    assert_eq!(p.business_days_elapsed, 9);
    assert_eq!(p.business_days_remaining, 11);
}

#[test]
fn reporting_period_missing_value_is_an_error() {
    let t = table(&[&["A", "PAGO", "", "", "", "", "", "12"], &["A", "PAGO", "", "", "", "", "", "x"]]);
    assert_eq!(
        reporting_period(&t).unwrap_err(),
        ReportError::MissingReportingParameter("business_days_elapsed")
    );
}

#[test]
fn amounts_out_of_range_are_zeroed_and_reported() {
    let huge = "R$ 79.228.162.514.264.337.593.543.950.335";
    let t = table(&[
        &["ANNA", "PAGO", "Cartão com Saque", "URA", huge, "03/02/2025", "ATUAL"],
        &["ANNA", "PAGO", "Cartão com Saque", "URA", huge, "03/02/2025", "ATUAL"],
        &["ANNA", "AG. INSS", "Cartão com Saque", "URA", "R$ -100,00", "03/02/2025", "ATUAL"],
    ]);
    let ledger = normalize_ledger(&t, &opts()).unwrap();
    assert!(ledger.records.iter().all(|r| r.amount.is_zero()));
    let rows: Vec<usize> = ledger
        .issues_of(IssueKind::MalformedAmount)
        .map(|i| i.row)
        .collect();
    assert_eq!(rows, vec![0, 1, 2]);

    let roster = [SalespersonTarget {
        salesperson: "ANNA".into(),
        card_quota: 10,
        withdrawal_quota: Decimal::ZERO,
        start_date: None,
        active: true,
    }];
    let period = ReportingPeriod {
        days_elapsed: 3,
        business_days_elapsed: 3,
        business_days_remaining: 5,
    };
    let report = aggregate(&ledger.records, &roster, &period).unwrap();
    assert_eq!(report.rows[0].paid_count, 2);
    assert_eq!(report.rows[0].amount_paid, Decimal::ZERO);
    let c = commission_breakdown(&ledger.records, &CommissionRates::default());
    assert_eq!(c.realised[1].base, Decimal::ZERO);
}

#[test]
fn blank_rows_are_skipped_silently() {
    let t = table(&[
        &["ANNA", "PAGO", "Cartão sem Saque", "URA", "", "03/02/2025", "ATUAL"],
        &["", " ", "", "", "", "", ""],
        &[],
        &["JOAO", "PAGO", "Cartão sem Saque", "URA", "", "bad", "ATUAL"],
    ]);
    let ledger = normalize_ledger(&t, &opts()).unwrap();
    let names: Vec<&str> = ledger
        .records
        .iter()
        .map(|r| r.salesperson.as_str())
        .collect();
    assert_eq!(names, vec!["ANNA", "JOAO"]);
    // Issue rows keep their sheet position
    assert_eq!(ledger.issues.len(), 1);
    assert_eq!(ledger.issues[0].row, 3);
    assert_eq!(ledger.issues[0].kind, IssueKind::MalformedDate);
}

#[test]
fn species_and_bank_are_read_when_present() {
    let t = RawTable {
        header: vec![
            "Vendedor".into(),
            "Status".into(),
            "Espécie".into(),
            " Banco ".into(),
            "Data".into(),
        ],
        rows: vec![vec![
            "ANNA".into(),
            "PAGO".into(),
            " PENSÃO ".into(),
            "FACTA".into(),
            "03/02/2025".into(),
        ]],
    };
    let ledger = normalize_ledger(&t, &opts()).unwrap();
    assert_eq!(ledger.records[0].species, "PENSÃO");
    assert_eq!(ledger.records[0].bank, "FACTA");

    let without = table(&[&["ANNA", "PAGO", "Cartão sem Saque", "URA", "", "03/02/2025"]]);
    let ledger = normalize_ledger(&without, &opts()).unwrap();
    assert_eq!(ledger.records[0].bank, "");
}
