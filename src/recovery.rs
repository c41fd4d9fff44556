// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::MonthlyReport;
use crate::models::{AggregateRow, SalespersonTarget};
use crate::utils::{ratio, round_half_up};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPlan {
    NeedsDevelopment,
    InDevelopment,
    Satisfactory,
}

impl RecoveryPlan {
    /// Tier for a conversion percentage: below 40, 40 up to 70, and 70 or more.
    pub fn classify(conversion_percent: Decimal) -> Self {
        if conversion_percent < Decimal::new(40, 0) {
            RecoveryPlan::NeedsDevelopment
        } else if conversion_percent < Decimal::new(70, 0) {
            RecoveryPlan::InDevelopment
        } else {
            RecoveryPlan::Satisfactory
        }
    }

    pub fn from_rate(conversion_rate: Decimal) -> Self {
        Self::classify(conversion_rate * Decimal::ONE_HUNDRED)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecoveryPlan::NeedsDevelopment => "Needs development",
            RecoveryPlan::InDevelopment => "In development",
            RecoveryPlan::Satisfactory => "Satisfactory",
        }
    }

    pub fn rule(&self) -> &'static str {
        match self {
            RecoveryPlan::NeedsDevelopment => "< 40%",
            RecoveryPlan::InDevelopment => "40% to 69%",
            RecoveryPlan::Satisfactory => ">= 70%",
        }
    }

    pub const ALL: [RecoveryPlan; 3] = [
        RecoveryPlan::Satisfactory,
        RecoveryPlan::InDevelopment,
        RecoveryPlan::NeedsDevelopment,
    ];
}

impl std::fmt::Display for RecoveryPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryRow {
    pub salesperson: String,
    pub start_date: Option<NaiveDate>,
    pub typed_count: u32,
    pub accepted_count: u32,
    pub conversion_rate: Decimal,
    pub plan: RecoveryPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount<T> {
    pub salesperson: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PendingDiagnostics {
    pub total_pending: u32,
    pub pending_per_day: i64,
    pub most_pending: Option<NamedCount<u32>>,
    pub most_pending_per_day: i64,
    pub lowest_conversion: Option<NamedCount<Decimal>>,
    /// Lowest accepted-per-day average, two decimals.
    pub lowest_daily_accepted: Option<NamedCount<Decimal>>,
    pub below_target: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryPanel {
    pub rows: Vec<RecoveryRow>,
    pub total_typed: u32,
    pub total_accepted: u32,
    pub total_conversion_rate: Decimal,
    pub diagnostics: PendingDiagnostics,
}

impl RecoveryPanel {
    pub fn rows_in(&self, plan: RecoveryPlan) -> impl Iterator<Item = &RecoveryRow> {
        self.rows.iter().filter(move |r| r.plan == plan)
    }
}

fn per_day(n: u32, days: u32) -> i64 {
    round_half_up(ratio(n, days)).to_i64().unwrap_or_default()
}

fn first_by<'a, K: PartialOrd>(
    rows: &[&'a AggregateRow],
    key: impl Fn(&AggregateRow) -> K,
    better: impl Fn(&K, &K) -> bool,
) -> Option<(&'a AggregateRow, K)> {
    let mut best: Option<(&'a AggregateRow, K)> = None;
    for r in rows {
        let k = key(*r);
        if best.as_ref().is_none_or(|(_, bk)| better(&k, bk)) {
            best = Some((*r, k));
        }
    }
    best
}

pub fn recovery_panel(report: &MonthlyReport, roster: &[SalespersonTarget]) -> RecoveryPanel {
    let active: Vec<&AggregateRow> = report.active_rows().collect();
    let days = report.period.days_elapsed;
    let start_of = |name: &str| {
        roster
            .iter()
            .find(|t| t.salesperson == name)
            .and_then(|t| t.start_date)
    };

    let rows: Vec<RecoveryRow> = active
        .iter()
        .map(|r| RecoveryRow {
            salesperson: r.salesperson.clone(),
            start_date: start_of(&r.salesperson),
            typed_count: r.typed_count,
            accepted_count: r.accepted_count,
            conversion_rate: r.conversion_rate,
            plan: RecoveryPlan::from_rate(r.conversion_rate),
        })
        .collect();
    let total_typed: u32 = rows.iter().map(|r| r.typed_count).sum();
    let total_accepted: u32 = rows.iter().map(|r| r.accepted_count).sum();

    // Sellers without typed sales are never named in the diagnostics.
    let selling: Vec<&AggregateRow> = active
        .iter()
        .copied()
        .filter(|r| r.typed_count > 0)
        .collect();
    let total_pending: u32 = selling.iter().map(|r| r.pending_count).sum();
    let most_pending = first_by(&selling, |r| r.pending_count, |a, b| a > b);
    let lowest_conversion = first_by(&selling, |r| r.conversion_rate, |a, b| a < b);
    let lowest_daily = first_by(&selling, |r| ratio(r.accepted_count, days), |a, b| a < b);

    let diagnostics = PendingDiagnostics {
        total_pending,
        pending_per_day: per_day(total_pending, days),
        most_pending_per_day: most_pending.map(|(_, n)| per_day(n, days)).unwrap_or_default(),
        most_pending: most_pending.map(|(r, n)| NamedCount {
            salesperson: r.salesperson.clone(),
            value: n,
        }),
        lowest_conversion: lowest_conversion.map(|(r, v)| NamedCount {
            salesperson: r.salesperson.clone(),
            value: v,
        }),
        lowest_daily_accepted: lowest_daily.map(|(r, v)| NamedCount {
            salesperson: r.salesperson.clone(),
            value: v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        }),
        below_target: active
            .iter()
            .filter(|r| r.projected_count < r.card_quota)
            .map(|r| r.salesperson.clone())
            .collect(),
    };

    RecoveryPanel {
        rows,
        total_typed,
        total_accepted,
        total_conversion_rate: ratio(total_accepted, total_typed),
        diagnostics,
    }
}
