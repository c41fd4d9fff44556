// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-salesperson and organisation KPIs over a normalized ledger.

use crate::error::ReportError;
use crate::models::{AggregateRow, ReportingPeriod, SaleRecord, SalespersonTarget, Status};
use crate::utils::{ratio, round_half_up};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

pub const TOTAL_LABEL: &str = "Total";

/// Sales by a salesperson missing from the roster, left out of the per-person table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedSeller {
    pub salesperson: String,
    pub records: usize,
}

/// Organisation cards computed over every record with a base status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Headline {
    pub paid_count: u32,
    pub awaiting_count: u32,
    pub blocked_count: u32,
    pub pending_count: u32,
    pub amount_paid: Decimal,
    pub projected_count: u32,
    pub attainment_rate: Decimal,
    pub conversion_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyGoal {
    /// Cards the team must accept per remaining business day to hit quota.
    pub cards_per_day: i64,
    pub per_seller: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub period: ReportingPeriod,
    /// Roster order by descending accepted count; Total not included.
    pub rows: Vec<AggregateRow>,
    pub total: AggregateRow,
    pub dropped: Vec<DroppedSeller>,
    pub headline: Headline,
    pub daily_goal: Option<DailyGoal>,
}

impl MonthlyReport {
    /// Per-seller rows with the Total row appended.
    pub fn rows_with_total(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }

    pub fn active_rows(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().filter(|r| r.active)
    }

    pub fn dropped_records(&self) -> usize {
        self.dropped.iter().map(|d| d.records).sum()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    paid: u32,
    awaiting: u32,
    blocked: u32,
    pending: u32,
    amount_paid: Decimal,
}

impl Tally {
    fn add(&mut self, r: &SaleRecord) {
        match r.status {
            Status::Paid => {
                self.paid += 1;
                self.amount_paid += r.amount;
            }
            Status::AwaitingApproval => self.awaiting += 1,
            Status::Blocked => self.blocked += 1,
            _ => {}
        }
        if r.is_attrition() {
            self.pending += 1;
        }
    }
}

/// Projected period-end count from paid + awaiting so far.
pub fn project(paid_and_awaiting: u32, period: &ReportingPeriod) -> u32 {
    let per_day = ratio(paid_and_awaiting, period.days_elapsed);
    round_half_up(per_day * Decimal::from(period.business_days_elapsed))
        .to_u32()
        .unwrap_or_default()
}

fn build_row(target: &SalespersonTarget, t: Tally, period: &ReportingPeriod) -> AggregateRow {
    let accepted = t.paid + t.awaiting + t.blocked;
    let typed = accepted + t.pending;
    let projected = project(t.paid + t.awaiting, period);
    AggregateRow {
        salesperson: target.salesperson.clone(),
        card_quota: target.card_quota,
        withdrawal_quota: target.withdrawal_quota,
        paid_count: t.paid,
        awaiting_count: t.awaiting,
        blocked_count: t.blocked,
        pending_count: t.pending,
        amount_paid: t.amount_paid,
        typed_count: typed,
        accepted_count: accepted,
        conversion_rate: ratio(accepted, typed),
        projected_count: projected,
        attainment_rate: ratio(projected, target.card_quota),
        active: target.active,
    }
}

/// Component-wise sum; rates are recomputed from the pooled numerators.
fn total_row(rows: &[AggregateRow]) -> AggregateRow {
    let mut t = AggregateRow {
        salesperson: TOTAL_LABEL.to_string(),
        ..AggregateRow::default()
    };
    for r in rows {
        t.card_quota += r.card_quota;
        t.withdrawal_quota += r.withdrawal_quota;
        t.paid_count += r.paid_count;
        t.awaiting_count += r.awaiting_count;
        t.blocked_count += r.blocked_count;
        t.pending_count += r.pending_count;
        t.amount_paid += r.amount_paid;
        t.typed_count += r.typed_count;
        t.accepted_count += r.accepted_count;
        t.projected_count += r.projected_count;
    }
    t.conversion_rate = ratio(t.accepted_count, t.typed_count);
    t.attainment_rate = ratio(t.projected_count, t.card_quota);
    t
}

fn headline(records: &[SaleRecord], total_quota: u32, period: &ReportingPeriod) -> Headline {
    let mut t = Tally::default();
    for r in records.iter().filter(|r| r.status.is_base()) {
        t.add(r);
    }
    let accepted = t.paid + t.awaiting + t.blocked;
    let projected = project(t.paid + t.awaiting, period);
    Headline {
        paid_count: t.paid,
        awaiting_count: t.awaiting,
        blocked_count: t.blocked,
        pending_count: t.pending,
        amount_paid: t.amount_paid,
        projected_count: projected,
        attainment_rate: ratio(projected, total_quota),
        conversion_rate: ratio(accepted, accepted + t.pending),
    }
}

fn daily_goal(total: &AggregateRow, active: usize, period: &ReportingPeriod) -> Option<DailyGoal> {
    if period.business_days_remaining == 0 || active == 0 {
        return None;
    }
    let missing = i64::from(total.card_quota)
        - i64::from(total.paid_count)
        - i64::from(total.awaiting_count);
    let cards_per_day = round_half_up(Decimal::from(missing) / Decimal::from(period.business_days_remaining))
        .to_i64()
        .unwrap_or_default();
    let per_seller = (Decimal::from(cards_per_day) / Decimal::from(active))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Some(DailyGoal {
        cards_per_day,
        per_seller,
    })
}

/// Build the monthly report.
///
/// Fails only when a reporting scalar needed as a denominator is zero:
/// `days_elapsed`, or the roster's summed card quota.
pub fn aggregate(
    records: &[SaleRecord],
    roster: &[SalespersonTarget],
    period: &ReportingPeriod,
) -> Result<MonthlyReport, ReportError> {
    if period.days_elapsed == 0 {
        return Err(ReportError::MissingReportingParameter("days_elapsed"));
    }
    let total_quota: u32 = roster.iter().map(|t| t.card_quota).sum();
    if total_quota == 0 {
        return Err(ReportError::MissingReportingParameter("card_quota"));
    }

    let mut targets: Vec<&SalespersonTarget> = Vec::with_capacity(roster.len());
    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for t in roster {
        if tallies.insert(t.salesperson.as_str(), Tally::default()).is_some() {
            warn!(salesperson = %t.salesperson, "duplicate roster entry ignored");
            continue;
        }
        targets.push(t);
    }

    let mut dropped: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        match tallies.get_mut(r.salesperson.as_str()) {
            Some(t) => t.add(r),
            None => *dropped.entry(r.salesperson.as_str()).or_default() += 1,
        }
    }

    let mut rows: Vec<AggregateRow> = targets
        .iter()
        .map(|t| build_row(t, tallies[t.salesperson.as_str()], period))
        .collect();
    rows.sort_by(|a, b| {
        b.accepted_count
            .cmp(&a.accepted_count)
            .then_with(|| a.salesperson.cmp(&b.salesperson))
    });
    let total = total_row(&rows);

    let dropped: Vec<DroppedSeller> = dropped
        .into_iter()
        .map(|(name, n)| DroppedSeller {
            salesperson: name.to_string(),
            records: n,
        })
        .collect();
    for d in &dropped {
        warn!(salesperson = %d.salesperson, records = d.records, "sales from seller not on roster excluded");
    }

    let active = rows.iter().filter(|r| r.active).count();
    let report = MonthlyReport {
        period: *period,
        headline: headline(records, total_quota, period),
        daily_goal: daily_goal(&total, active, period),
        rows,
        total,
        dropped,
    };
    debug!(
        sellers = report.rows.len(),
        accepted = report.total.accepted_count,
        "aggregated monthly report"
    );
    Ok(report)
}
