// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use salesboard::daily::{GoalStatus, daily_panel};
use salesboard::error::ReportError;
use salesboard::models::RawTable;

fn sheet(rows: &[[&str; 8]]) -> RawTable {
    let header = [
        "Vendedor",
        "Meta Dia",
        "Valor",
        "Aceite Dia",
        "Aceite Anterior",
        "Total",
        "Ligações",
        "TMA ",
    ];
    RawTable {
        header: header.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

#[test]
fn last_row_is_team_and_ties_share_the_highlight() {
    let t = sheet(&[
        ["ANNA", "3", "R$ 1.200,00", "2", "1", "3", "80", "00:04:10"],
        ["JOAO", "3", "", "3", "0", "3", "95", "00:03:05"],
        ["LIA", "3", "abc", "0", "1", "1", "40", ""],
        ["TOTAL", "9", "R$ 1.200,00", "5", "2", "7", "215", "00:03:40"],
    ]);
    let p = daily_panel(&t).unwrap().unwrap();
    assert_eq!(p.rows.len(), 3);
    assert_eq!(p.rows[0].amount, Decimal::new(1200, 0));
    assert_eq!(p.rows[2].amount, Decimal::ZERO);
    assert_eq!(p.team.salesperson, "TOTAL");
    assert_eq!(p.difference, -2);
    assert_eq!(p.status, GoalStatus::Short(2));
    assert_eq!(p.top_sellers, vec!["ANNA", "JOAO"]);
    assert_eq!(p.top_total, 3);
    assert_eq!(p.rows[1].handle_time, "00:03:05");
}

#[test]
fn goal_status_from_difference() {
    assert_eq!(GoalStatus::from_difference(4), GoalStatus::Exceeded(4));
    assert_eq!(GoalStatus::from_difference(0), GoalStatus::Met);
    assert_eq!(GoalStatus::from_difference(-1), GoalStatus::Short(1));
}

#[test]
fn quiet_day_has_no_top_seller() {
    let t = sheet(&[
        ["ANNA", "2", "", "0", "0", "0", "10", ""],
        ["TOTAL", "2", "", "0", "0", "0", "10", ""],
    ]);
    let p = daily_panel(&t).unwrap().unwrap();
    assert!(p.top_sellers.is_empty());
    assert_eq!(p.status, GoalStatus::Short(2));
}

#[test]
fn empty_sheet_and_missing_columns() {
    assert_eq!(daily_panel(&sheet(&[])).unwrap(), None);

    let t = RawTable {
        header: vec!["Vendedor".into(), "Total".into()],
        rows: vec![],
    };
    assert_eq!(
        daily_panel(&t).unwrap_err(),
        ReportError::MissingColumn("Meta Dia".into())
    );
}
