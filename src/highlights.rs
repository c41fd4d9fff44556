// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Narrative callouts drawn from the monthly table.
//!
//! Only active sellers are considered. "Top performer" and "best conversion"
//! pick the first maximum in report order; "best attainment" reports every
//! seller tied at the maximum.

use crate::aggregate::MonthlyReport;
use crate::models::AggregateRow;
use crate::utils::percent;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPerformer {
    pub salesperson: String,
    pub accepted_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestConversion {
    pub salesperson: String,
    pub conversion_rate: Decimal,
    /// False when nobody met the volume floor and the pick fell back to all sellers.
    pub met_volume_floor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestAttainment {
    pub salespeople: Vec<String>,
    pub attainment_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Highlights {
    pub top_performer: Option<TopPerformer>,
    pub best_conversion: Option<BestConversion>,
    pub best_attainment: Option<BestAttainment>,
}

/// First row holding the maximum of `key`. `Iterator::max_by_key` keeps the last.
fn first_max_by<'a, K: Ord>(
    rows: impl IntoIterator<Item = &'a AggregateRow>,
    key: impl Fn(&AggregateRow) -> K,
) -> Option<&'a AggregateRow> {
    let mut best: Option<(&'a AggregateRow, K)> = None;
    for r in rows {
        let k = key(r);
        if best.as_ref().is_none_or(|(_, bk)| k > *bk) {
            best = Some((r, k));
        }
    }
    best.map(|(r, _)| r)
}

pub fn top_performer(rows: &[&AggregateRow]) -> Option<TopPerformer> {
    first_max_by(rows.iter().copied(), |r| r.accepted_count)
        .filter(|r| r.accepted_count > 0)
        .map(|r| TopPerformer {
            salesperson: r.salesperson.clone(),
            accepted_count: r.accepted_count,
        })
}

/// Minimum accepted volume (two per elapsed day) to qualify for best conversion.
pub fn volume_floor(days_elapsed: u32) -> u32 {
    days_elapsed.saturating_mul(2)
}

pub fn best_conversion(rows: &[&AggregateRow], days_elapsed: u32) -> Option<BestConversion> {
    let floor = volume_floor(days_elapsed);
    let qualified: Vec<&AggregateRow> = rows
        .iter()
        .copied()
        .filter(|r| r.accepted_count >= floor)
        .collect();
    let met_volume_floor = !qualified.is_empty();
    let pool: Vec<&AggregateRow> = if met_volume_floor {
        qualified
    } else {
        rows.to_vec()
    };
    first_max_by(pool, |r| r.conversion_rate)
        .filter(|r| !r.conversion_rate.is_zero())
        .map(|r| BestConversion {
            salesperson: r.salesperson.clone(),
            conversion_rate: r.conversion_rate,
            met_volume_floor,
        })
}

/// Everyone tied at the highest whole-percent attainment.
pub fn best_attainment(rows: &[&AggregateRow]) -> Option<BestAttainment> {
    let max = rows.iter().map(|r| percent(r.attainment_rate)).max()?;
    if max <= 0 {
        return None;
    }
    Some(BestAttainment {
        salespeople: rows
            .iter()
            .filter(|r| percent(r.attainment_rate) == max)
            .map(|r| r.salesperson.clone())
            .collect(),
        attainment_percent: max,
    })
}

pub fn highlights(report: &MonthlyReport) -> Highlights {
    let rows: Vec<&AggregateRow> = report.active_rows().collect();
    Highlights {
        top_performer: top_performer(&rows),
        best_conversion: best_conversion(&rows, report.period.days_elapsed),
        best_attainment: best_attainment(&rows),
    }
}
