// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily ledger summary: one row per seller plus a trailing team row.

use crate::error::ReportError;
use crate::models::RawTable;
use crate::utils::parse_currency;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

const COLUMNS: [&str; 8] = [
    "Vendedor",
    "Meta Dia",
    "Valor",
    "Aceite Dia",
    "Aceite Anterior",
    "Total",
    "Ligações",
    "TMA",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRow {
    pub salesperson: String,
    pub goal: i64,
    pub amount: Decimal,
    pub accepted_today: i64,
    pub accepted_before: i64,
    pub total: i64,
    pub calls: i64,
    /// Average handling time, as typed in the sheet.
    pub handle_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cards", rename_all = "snake_case")]
pub enum GoalStatus {
    Exceeded(i64),
    Met,
    Short(i64),
}

impl GoalStatus {
    pub fn from_difference(diff: i64) -> Self {
        match diff {
            d if d > 0 => GoalStatus::Exceeded(d),
            0 => GoalStatus::Met,
            d => GoalStatus::Short(-d),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPanel {
    pub rows: Vec<DailyRow>,
    pub team: DailyRow,
    /// Team total minus team goal.
    pub difference: i64,
    pub status: GoalStatus,
    /// Everyone tied at the day's highest total; empty when nobody sold.
    pub top_sellers: Vec<String>,
    pub top_total: i64,
}

fn count(s: &str) -> i64 {
    s.trim().parse::<i64>().unwrap_or_default()
}

/// Parse the daily table. `Ok(None)` when the sheet has no data rows.
pub fn daily_panel(table: &RawTable) -> Result<Option<DailyPanel>, ReportError> {
    let mut idx = [0usize; 8];
    for (i, name) in COLUMNS.iter().enumerate() {
        idx[i] = table
            .column(name)
            .ok_or_else(|| ReportError::MissingColumn(name.to_string()))?;
    }
    let mut rows: Vec<DailyRow> = (0..table.rows.len())
        .map(|row| {
            let c = |i: usize| table.cell(row, idx[i]);
            DailyRow {
                salesperson: c(0).trim().to_string(),
                goal: count(c(1)),
                amount: parse_currency(c(2)),
                accepted_today: count(c(3)),
                accepted_before: count(c(4)),
                total: count(c(5)),
                calls: count(c(6)),
                handle_time: c(7).trim().to_string(),
            }
        })
        .collect();
    let Some(team) = rows.pop() else {
        return Ok(None);
    };

    let difference = team.total - team.goal;
    let top_total = rows.iter().map(|r| r.total).max().unwrap_or_default();
    let top_sellers = if top_total > 0 {
        rows.iter()
            .filter(|r| r.total == top_total)
            .map(|r| r.salesperson.clone())
            .collect()
    } else {
        Vec::new()
    };
    debug!(sellers = rows.len(), difference, "parsed daily panel");

    Ok(Some(DailyPanel {
        rows,
        team,
        difference,
        status: GoalStatus::from_difference(difference),
        top_sellers,
        top_total,
    }))
}
