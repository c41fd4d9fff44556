// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::aggregate::MonthlyReport;
use crate::highlights::{Highlights, highlights};
use crate::models::AggregateRow;
use crate::utils::{fmt_brl, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MonthlyView {
    pub report: MonthlyReport,
    pub highlights: Highlights,
}

pub fn build(ctx: &Context) -> Result<MonthlyView> {
    let (_, report) = ctx.monthly_report()?;
    let highlights = highlights(&report);
    Ok(MonthlyView { report, highlights })
}

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let view = build(ctx)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    print_headline(&view.report);
    println!("{}", monthly_table(&view.report));
    print_highlights(&view);
    Ok(())
}

pub fn row_cells(r: &AggregateRow) -> Vec<String> {
    vec![
        r.salesperson.clone(),
        r.card_quota.to_string(),
        fmt_brl(&r.withdrawal_quota),
        r.projected_count.to_string(),
        fmt_percent(r.attainment_rate),
        r.typed_count.to_string(),
        r.paid_count.to_string(),
        r.awaiting_count.to_string(),
        fmt_brl(&r.amount_paid),
        r.blocked_count.to_string(),
        fmt_percent(r.conversion_rate),
        r.pending_count.to_string(),
    ]
}

pub const MONTHLY_HEADERS: [&str; 12] = [
    "Seller",
    "Card quota",
    "Withdrawal quota",
    "Projected",
    "Proj. attain.",
    "Typed",
    "Paid",
    "Awaiting",
    "Amount paid",
    "Blocked",
    "Conversion",
    "Pending",
];

pub fn monthly_table(report: &MonthlyReport) -> comfy_table::Table {
    let data = report.rows_with_total().map(row_cells).collect();
    pretty_table(&MONTHLY_HEADERS, data)
}

fn print_headline(report: &MonthlyReport) {
    let h = &report.headline;
    let data = vec![
        vec!["Paid".into(), h.paid_count.to_string()],
        vec!["Awaiting approval".into(), h.awaiting_count.to_string()],
        vec!["Projection".into(), h.projected_count.to_string()],
        vec!["Projected attainment".into(), fmt_percent(h.attainment_rate)],
        vec!["Amount paid".into(), fmt_brl(&h.amount_paid)],
        vec!["Blocked".into(), h.blocked_count.to_string()],
        vec!["Conversion over typed".into(), fmt_percent(h.conversion_rate)],
        vec!["Pending".into(), h.pending_count.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], data));
}

fn print_highlights(view: &MonthlyView) {
    let r = &view.report;
    if let Some(goal) = &r.daily_goal {
        println!("Daily goal: {} cards", goal.cards_per_day);
        println!("Per seller: {} cards", goal.per_seller);
    }
    let h = &view.highlights;
    if let Some(top) = &h.top_performer {
        println!(
            "Most acceptances: {} with {} accepted",
            top.salesperson, top.accepted_count
        );
    }
    if let Some(best) = &h.best_conversion {
        println!(
            "Best conversion over typed: {} with {} (minimum {} accepted)",
            best.salesperson,
            fmt_percent(best.conversion_rate),
            crate::highlights::volume_floor(r.period.days_elapsed)
        );
    }
    if let Some(best) = &h.best_attainment {
        println!(
            "Best projected attainment: {} with {}%",
            best.salespeople.join(", "),
            best.attainment_percent
        );
    }
    if !r.dropped.is_empty() {
        eprintln!(
            "warning: {} record(s) from {} seller(s) not on the roster were left out (see `salesboard doctor`)",
            r.dropped_records(),
            r.dropped.len()
        );
    }
}
