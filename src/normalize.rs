// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw ledger rows to typed [`SaleRecord`]s.

use crate::error::{IssueKind, ReportError, RowIssue};
use crate::models::{Product, Profile, RawTable, ReportingPeriod, SaleRecord, Status};
use crate::utils::{parse_currency, parse_day_first_date, try_parse_currency};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

pub const COL_SALESPERSON: &str = "Vendedor";
pub const COL_STATUS: &str = "Status";
pub const COL_PRODUCT: &str = "Produto";
pub const COL_ORIGIN: &str = "Origem";
pub const COL_AMOUNT: &str = "Valor";
pub const COL_DATE: &str = "Data";
pub const COL_PROFILE: &str = "Perfil";
pub const COL_SPECIES: &str = "Espécie";
pub const COL_BANK: &str = "Banco";
/// Helper column carrying days elapsed / business days / days remaining in rows 0..2.
pub const COL_PERIOD: &str = "Ajuda";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub cutoff: NaiveDate,
    pub bucket: NaiveDate,
}

impl From<&crate::config::ReportConfig> for NormalizeOptions {
    fn from(cfg: &crate::config::ReportConfig) -> Self {
        Self {
            cutoff: cfg.cutoff_date,
            bucket: cfg.bucket_date,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedLedger {
    pub records: Vec<SaleRecord>,
    pub issues: Vec<RowIssue>,
}

impl NormalizedLedger {
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &RowIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }
}

/// Dates on or before `cutoff` are filed under `bucket`; later dates are kept.
pub fn collapse_to_bucket(date: NaiveDate, cutoff: NaiveDate, bucket: NaiveDate) -> NaiveDate {
    if date <= cutoff { bucket } else { date }
}

pub fn normalize_ledger(
    table: &RawTable,
    opts: &NormalizeOptions,
) -> Result<NormalizedLedger, ReportError> {
    let required = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
    };
    let c_seller = required(COL_SALESPERSON)?;
    let c_status = required(COL_STATUS)?;
    let c_product = table.column(COL_PRODUCT);
    let c_origin = table.column(COL_ORIGIN);
    let c_amount = table.column(COL_AMOUNT);
    let c_date = table.column(COL_DATE);
    let c_profile = table.column(COL_PROFILE);
    let c_species = table.column(COL_SPECIES);
    let c_bank = table.column(COL_BANK);

    let cell = |row: usize, col: Option<usize>| col.map(|c| table.cell(row, c)).unwrap_or("");

    let mut out = NormalizedLedger::default();
    let mut blank = 0usize;
    for row in 0..table.rows.len() {
        let status_raw = table.cell(row, c_status);
        if status_raw.trim().is_empty() && table.cell(row, c_seller).trim().is_empty() {
            blank += 1;
            continue;
        }
        let mut issue = |column: &'static str, value: &str, kind: IssueKind| {
            out.issues.push(RowIssue {
                row,
                column,
                value: value.to_string(),
                kind,
            });
        };

        let status = Status::from_cell(status_raw);
        if status.is_unknown() {
            issue(COL_STATUS, status_raw, IssueKind::UnknownEnumValue);
        }

        let product_raw = cell(row, c_product);
        let product = Product::from_cell(product_raw);
        if product.is_unknown() {
            issue(COL_PRODUCT, product_raw, IssueKind::UnknownEnumValue);
        }

        let amount_raw = cell(row, c_amount);
        if !amount_raw.trim().is_empty() && try_parse_currency(amount_raw).is_none() {
            issue(COL_AMOUNT, amount_raw, IssueKind::MalformedAmount);
        }
        let amount = parse_currency(amount_raw);

        let date_raw = cell(row, c_date);
        let date = match parse_day_first_date(date_raw) {
            Some(d) => Some(collapse_to_bucket(d, opts.cutoff, opts.bucket)),
            None => {
                issue(COL_DATE, date_raw, IssueKind::MalformedDate);
                None
            }
        };

        out.records.push(SaleRecord {
            salesperson: table.cell(row, c_seller).trim().to_string(),
            status,
            product,
            origin: cell(row, c_origin).trim().to_string(),
            species: cell(row, c_species).trim().to_string(),
            bank: cell(row, c_bank).trim().to_string(),
            amount,
            date,
            profile: Profile::from_cell(cell(row, c_profile)),
        });
    }

    if !out.issues.is_empty() {
        warn!(issues = out.issues.len(), "ledger rows needed recovery");
    }
    debug!(records = out.records.len(), blank, "normalized ledger");
    Ok(out)
}

/// Read the reporting scalars from the ledger's helper column.
pub fn reporting_period(table: &RawTable) -> Result<ReportingPeriod, ReportError> {
    const FIELDS: [&str; 3] = [
        "days_elapsed",
        "business_days_elapsed",
        "business_days_remaining",
    ];
    let col = table
        .column(COL_PERIOD)
        .ok_or(ReportError::MissingReportingParameter(FIELDS[0]))?;
    let mut vals = [0u32; 3];
    for (i, name) in FIELDS.iter().enumerate() {
        vals[i] = table
            .cell(i, col)
            .trim()
            .parse::<u32>()
            .map_err(|_| ReportError::MissingReportingParameter(*name))?;
    }
    Ok(ReportingPeriod {
        days_elapsed: vals[0],
        business_days_elapsed: vals[1],
        business_days_remaining: vals[2],
    })
}
