// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Query parameters for the chart-style breakdowns.

use crate::models::{AcceptanceStatus, SaleRecord, Status};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Empty lists mean "no restriction". A date bound excludes undated records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub statuses: Vec<Status>,
    pub origins: Vec<String>,
    pub acceptance: Vec<AcceptanceStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn matches(&self, r: &SaleRecord) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&r.status) {
            return false;
        }
        if !self.origins.is_empty() && !self.origins.iter().any(|o| o == &r.origin) {
            return false;
        }
        if !self.acceptance.is_empty() && !self.acceptance.contains(&r.acceptance_status()) {
            return false;
        }
        if self.from.is_some() || self.to.is_some() {
            let Some(d) = r.date else {
                return false;
            };
            if self.from.is_some_and(|f| d < f) || self.to.is_some_and(|t| d > t) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: &'a [SaleRecord]) -> Vec<&'a SaleRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Product,
    Origin,
    Species,
    Bank,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Counts per value of `dim`, ascending by count then label.
pub fn distribution_by(records: &[&SaleRecord], dim: Dimension) -> Vec<Bucket> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in records {
        let label = match dim {
            Dimension::Product => r.product.label().to_string(),
            Dimension::Origin => r.origin.clone(),
            Dimension::Species => r.species.clone(),
            Dimension::Bank => r.bank.clone(),
            Dimension::Status => r.status.label().to_string(),
        };
        *counts.entry(label).or_default() += 1;
    }
    let mut out: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, count)| Bucket { label, count })
        .collect();
    out.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.label.cmp(&b.label)));
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAcceptance {
    pub date: NaiveDate,
    pub accepted: usize,
    pub pending_acceptance: usize,
}

/// Accepted vs. not-yet-accepted counts per day. Undated records are skipped.
pub fn daily_acceptance(records: &[&SaleRecord]) -> Vec<DailyAcceptance> {
    let mut by_day: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for r in records {
        let Some(date) = r.date else { continue };
        let e = by_day.entry(date).or_default();
        match r.acceptance_status() {
            AcceptanceStatus::Accepted => e.0 += 1,
            AcceptanceStatus::PendingAcceptance => e.1 += 1,
        }
    }
    by_day
        .into_iter()
        .map(|(date, (accepted, pending_acceptance))| DailyAcceptance {
            date,
            accepted,
            pending_acceptance,
        })
        .collect()
}
