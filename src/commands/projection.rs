// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, require_access};
use crate::access::AccessLevel;
use crate::commission::{BucketLine, CommissionBreakdown, RevenueProjection, commission_breakdown, revenue_projection};
use crate::utils::{fmt_brl, fmt_thousands, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProjectionView {
    pub commission: CommissionBreakdown,
    pub revenue: RevenueProjection,
}

pub fn build(ctx: &Context) -> Result<ProjectionView> {
    let (ledger, _) = ctx.monthly_ledger()?;
    let commission = commission_breakdown(&ledger.records, &ctx.config.rates);
    let revenue = revenue_projection(commission.total, &ctx.config.deductions);
    Ok(ProjectionView {
        commission,
        revenue,
    })
}

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    require_access(ctx, sub, AccessLevel::can_view_projection)?;
    let view = build(ctx)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }

    let line = |l: &BucketLine| {
        vec![
            l.label.to_string(),
            fmt_thousands(&l.base),
            fmt_thousands(&l.commission),
            l.reference.clone(),
        ]
    };
    let subtotal = |label: &str, v| vec![label.to_string(), String::new(), fmt_thousands(v), String::new()];
    let c = &view.commission;
    let mut data: Vec<Vec<String>> = c.realised.iter().map(line).collect();
    data.push(subtotal("Subtotal (realised)", &c.realised_subtotal));
    data.extend(c.expected.iter().map(line));
    data.push(subtotal("Subtotal (expected)", &c.expected_subtotal));
    data.push(subtotal("TOTAL", &c.total));
    println!(
        "{}",
        pretty_table(&["Projection", "Qty/Amount", "Commission", "Reference"], data)
    );

    let r = &view.revenue;
    let mut data = vec![vec![
        "Gross revenue projection".to_string(),
        fmt_thousands(&r.gross),
        String::new(),
    ]];
    data.extend(
        r.deductions
            .iter()
            .map(|d| vec![d.label.to_string(), fmt_thousands(&d.value), d.reference.clone()]),
    );
    println!(
        "{}",
        pretty_table(&["Costs and expenses", "Amount", "Reference"], data)
    );
    println!("Net revenue projection: {}", fmt_brl(&r.net));
    Ok(())
}
