// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, require_access};
use crate::access::AccessLevel;
use crate::filters::{Bucket, DailyAcceptance, Dimension, ReportFilter, daily_acceptance, distribution_by};
use crate::models::{AcceptanceStatus, Status};
use crate::recovery::{RecoveryPanel, RecoveryPlan, recovery_panel};
use crate::utils::{fmt_percent, maybe_print_json, parse_day_first_date, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IndicatorsView {
    pub recovery: RecoveryPanel,
    pub daily_acceptance: Vec<DailyAcceptance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_product: Option<Vec<Bucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_origin: Option<Vec<Bucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_species: Option<Vec<Bucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_bank: Option<Vec<Bucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_status: Option<Vec<Bucket>>,
}

fn base_statuses() -> Vec<Status> {
    vec![
        Status::Paid,
        Status::AwaitingApproval,
        Status::Blocked,
        Status::Pending,
        Status::Cancelled,
    ]
}

/// Filter from the command line. Status defaults to the five base statuses.
pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<ReportFilter> {
    let date = |key: &str| -> Result<Option<chrono::NaiveDate>> {
        sub.get_one::<String>(key)
            .map(|s| parse_day_first_date(s).ok_or_else(|| anyhow!("Invalid date '{}' for --{}", s, key)))
            .transpose()
    };
    let statuses: Vec<Status> = sub
        .get_many::<String>("status")
        .map(|vals| vals.map(|s| Status::from_cell(s)).collect())
        .unwrap_or_else(base_statuses);
    let origins = sub
        .get_many::<String>("origin")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let acceptance = match sub.get_one::<String>("acceptance").map(String::as_str) {
        Some("accepted") => vec![AcceptanceStatus::Accepted],
        Some("pending") => vec![AcceptanceStatus::PendingAcceptance],
        _ => Vec::new(),
    };
    Ok(ReportFilter {
        statuses,
        origins,
        acceptance,
        from: date("from")?,
        to: date("to")?,
    })
}

pub fn build(ctx: &Context, level: AccessLevel, filter: &ReportFilter) -> Result<IndicatorsView> {
    let (ledger, report) = ctx.monthly_report()?;
    let recovery = recovery_panel(&report, &ctx.config.roster);

    let view = if level.can_view_distributions() {
        let selected = filter.apply(&ledger.records);
        IndicatorsView {
            recovery,
            daily_acceptance: daily_acceptance(&selected),
            by_product: Some(distribution_by(&selected, Dimension::Product)),
            by_origin: Some(distribution_by(&selected, Dimension::Origin)),
            by_species: Some(distribution_by(&selected, Dimension::Species)),
            by_bank: Some(distribution_by(&selected, Dimension::Bank)),
            by_status: Some(distribution_by(&selected, Dimension::Status)),
        }
    } else {
        // Supervisors only choose the acceptance split.
        let acceptance_only = ReportFilter {
            statuses: base_statuses(),
            acceptance: filter.acceptance.clone(),
            ..ReportFilter::default()
        };
        let selected = acceptance_only.apply(&ledger.records);
        IndicatorsView {
            recovery,
            daily_acceptance: daily_acceptance(&selected),
            by_product: None,
            by_origin: None,
            by_species: None,
            by_bank: None,
            by_status: None,
        }
    };
    Ok(view)
}

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let level = require_access(ctx, sub, AccessLevel::can_view_recovery)?;
    let filter = filter_from_matches(sub)?;
    let view = build(ctx, level, &filter)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    print_recovery(&view.recovery);
    let breakdowns = [
        ("Product", &view.by_product),
        ("Origin", &view.by_origin),
        ("Species", &view.by_species),
        ("Bank", &view.by_bank),
        ("Status", &view.by_status),
    ];
    for (title, buckets) in breakdowns {
        if let Some(b) = buckets {
            print_buckets(title, b);
        }
    }
    let data = view
        .daily_acceptance
        .iter()
        .map(|d| {
            vec![
                d.date.format("%d/%m/%Y").to_string(),
                d.accepted.to_string(),
                d.pending_acceptance.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", AcceptanceStatus::Accepted.label(), AcceptanceStatus::PendingAcceptance.label()], data)
    );
    Ok(())
}

fn print_buckets(title: &str, buckets: &[Bucket]) {
    let data = buckets
        .iter()
        .map(|b| vec![b.label.clone(), b.count.to_string()])
        .collect();
    println!("{}", pretty_table(&[title, "Sales"], data));
}

fn print_recovery(panel: &RecoveryPanel) {
    let d = &panel.diagnostics;
    if d.total_pending > 0 {
        println!(
            "Pending cards: {} in total, {} per day on average",
            d.total_pending, d.pending_per_day
        );
        if let Some(low) = &d.lowest_conversion {
            println!(
                "Lowest conversion over typed: {} with {}",
                low.salesperson,
                fmt_percent(low.value)
            );
        }
        if let Some(most) = &d.most_pending {
            println!(
                "Most pending: {} with {} cards, {} per day",
                most.salesperson, most.value, d.most_pending_per_day
            );
        }
        if let Some(low) = &d.lowest_daily_accepted {
            println!(
                "Lowest daily acceptance: {} with {} per day",
                low.salesperson, low.value
            );
        }
    }
    if !d.below_target.is_empty() {
        println!("Projected below quota: {}", d.below_target.join(", "));
    }

    let rules = RecoveryPlan::ALL
        .iter()
        .map(|p| vec![p.rule().to_string(), p.label().to_string()])
        .collect();
    println!("{}", pretty_table(&["Conversion over typed", "Recovery plan"], rules));

    for plan in RecoveryPlan::ALL {
        let data: Vec<Vec<String>> = panel
            .rows_in(plan)
            .map(|r| {
                vec![
                    r.salesperson.clone(),
                    r.start_date
                        .map(|d| d.format("%d/%m/%Y").to_string())
                        .unwrap_or_default(),
                    r.typed_count.to_string(),
                    r.accepted_count.to_string(),
                    fmt_percent(r.conversion_rate),
                    r.plan.to_string(),
                ]
            })
            .collect();
        if data.is_empty() {
            continue;
        }
        println!(
            "{}",
            pretty_table(&["Seller", "Start", "Typed", "Accepted", "Conversion", "Plan"], data)
        );
    }
    println!(
        "Total: {} typed, {} accepted, {} conversion",
        panel.total_typed,
        panel.total_accepted,
        fmt_percent(panel.total_conversion_rate)
    );
}
