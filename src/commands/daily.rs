// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::daily::{DailyPanel, GoalStatus, daily_panel};
use crate::utils::{fmt_brl, maybe_print_json, pretty_table};
use anyhow::{Context as _, Result};

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let table = ctx.daily_table()?;
    let Some(panel) = daily_panel(&table).context("Read daily ledger")? else {
        println!("No rows in the daily ledger.");
        return Ok(());
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &panel)? {
        return Ok(());
    }
    print_panel(&panel);
    Ok(())
}

fn print_panel(panel: &DailyPanel) {
    let data = panel
        .rows
        .iter()
        .chain(std::iter::once(&panel.team))
        .map(|r| {
            vec![
                r.salesperson.clone(),
                r.goal.to_string(),
                fmt_brl(&r.amount),
                r.accepted_today.to_string(),
                r.accepted_before.to_string(),
                r.total.to_string(),
                r.calls.to_string(),
                r.handle_time.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Seller",
                "Daily goal",
                "Amount",
                "Accepted today",
                "Accepted before",
                "Total",
                "Calls",
                "Avg handle time",
            ],
            data
        )
    );
    println!("Daily goal: {} cards", panel.team.goal);
    match panel.status {
        GoalStatus::Exceeded(n) => println!("Daily goal beaten by {} cards", n),
        GoalStatus::Met => println!("Daily goal met"),
        GoalStatus::Short(n) => println!("{} cards short of the daily goal", n),
    }
    if !panel.top_sellers.is_empty() {
        println!(
            "Highlight of the day: {} with {} accepted",
            panel.top_sellers.join(", "),
            panel.top_total
        );
    }
}
