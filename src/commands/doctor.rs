// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::aggregate::{MonthlyReport, aggregate};
use crate::normalize::NormalizedLedger;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub issue: String,
    pub detail: String,
}

/// Data-quality findings for one ledger. Empty means clean.
pub fn findings(ledger: &NormalizedLedger, report: &MonthlyReport) -> Vec<Finding> {
    let mut rows = Vec::new();

    // 1) Sales credited to sellers missing from the roster
    for d in &report.dropped {
        rows.push(Finding {
            issue: "seller_not_on_roster".into(),
            detail: format!("{} ({} records)", d.salesperson, d.records),
        });
    }

    // 2) Cells recovered during normalization; row numbers are 1-based sheet data rows
    for i in &ledger.issues {
        rows.push(Finding {
            issue: i.kind.to_string(),
            detail: format!("row {} {}: '{}'", i.row + 1, i.column, i.value),
        });
    }

    // 3) Active roster entries with no typed sales
    for r in report.active_rows().filter(|r| r.typed_count == 0) {
        rows.push(Finding {
            issue: "roster_without_sales".into(),
            detail: r.salesperson.clone(),
        });
    }
    rows
}

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let (ledger, period) = ctx.monthly_ledger()?;
    let report = aggregate(&ledger.records, &ctx.config.roster, &period)?;
    let found = findings(&ledger, &report);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &found)? {
        return Ok(());
    }
    if found.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let data = found.into_iter().map(|f| vec![f.issue, f.detail]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], data));
    }
    Ok(())
}
