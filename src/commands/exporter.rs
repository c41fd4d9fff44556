// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::aggregate::MonthlyReport;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => {
            let (_, report) = ctx.monthly_report()?;
            export_monthly(&report, sub)
        }
        _ => Ok(()),
    }
}

pub fn export_monthly(report: &MonthlyReport, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record([
                "salesperson",
                "card_quota",
                "withdrawal_quota",
                "projected",
                "attainment_rate",
                "typed",
                "paid",
                "awaiting",
                "amount_paid",
                "blocked",
                "conversion_rate",
                "pending",
            ])?;
            for r in report.rows_with_total() {
                wtr.write_record([
                    r.salesperson.clone(),
                    r.card_quota.to_string(),
                    r.withdrawal_quota.to_string(),
                    r.projected_count.to_string(),
                    r.attainment_rate.round_dp(4).to_string(),
                    r.typed_count.to_string(),
                    r.paid_count.to_string(),
                    r.awaiting_count.to_string(),
                    r.amount_paid.to_string(),
                    r.blocked_count.to_string(),
                    r.conversion_rate.round_dp(4).to_string(),
                    r.pending_count.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = report
                .rows_with_total()
                .map(|r| {
                    json!({
                        "salesperson": r.salesperson,
                        "card_quota": r.card_quota,
                        "withdrawal_quota": r.withdrawal_quota.to_string(),
                        "projected": r.projected_count,
                        "attainment_rate": r.attainment_rate.round_dp(4).to_string(),
                        "typed": r.typed_count,
                        "paid": r.paid_count,
                        "awaiting": r.awaiting_count,
                        "amount_paid": r.amount_paid.to_string(),
                        "blocked": r.blocked_count,
                        "conversion_rate": r.conversion_rate.round_dp(4).to_string(),
                        "pending": r.pending_count,
                    })
                })
                .collect();
            std::fs::write(&out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported monthly report to {}", out);
    Ok(())
}
