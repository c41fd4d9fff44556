// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row loaders for the monthly and daily ledgers.

use crate::config::SheetRanges;
use crate::error::SourceError;
use crate::models::RawTable;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

pub const SHEETS_API: &str = "https://sheets.googleapis.com";

pub trait RowSource {
    fn monthly_rows(&self) -> Result<RawTable, SourceError>;
    fn daily_rows(&self) -> Result<RawTable, SourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetsAuth {
    ApiKey(String),
    Bearer(String),
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Google Sheets v4 `values.get` over a blocking client.
pub struct SheetsSource {
    client: reqwest::blocking::Client,
    base_url: String,
    spreadsheet_id: String,
    auth: SheetsAuth,
    ranges: SheetRanges,
}

impl SheetsSource {
    pub fn new(
        client: reqwest::blocking::Client,
        spreadsheet_id: impl Into<String>,
        auth: SheetsAuth,
        ranges: SheetRanges,
    ) -> Self {
        Self {
            client,
            base_url: SHEETS_API.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            auth,
            ranges,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Endpoint for `range`; the range is percent-encoded as a path segment.
    pub fn values_url(&self, range: &str) -> Result<reqwest::Url, SourceError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|_| SourceError::NotConfigured("sheets base url"))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::NotConfigured("sheets base url"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    fn fetch(&self, range: &str) -> Result<RawTable, SourceError> {
        let url = self.values_url(range)?;
        debug!(%url, "fetching sheet range");
        let req = self.client.get(url);
        let req = match &self.auth {
            SheetsAuth::ApiKey(k) => req.query(&[("key", k.as_str())]),
            SheetsAuth::Bearer(t) => req.bearer_auth(t),
        };
        let body: ValueRange = req.send()?.error_for_status()?.json()?;
        if body.values.is_empty() {
            return Err(SourceError::EmptySheet(range.to_string()));
        }
        info!(range, rows = body.values.len(), "fetched sheet range");
        Ok(RawTable::from_values(body.values))
    }
}

impl RowSource for SheetsSource {
    fn monthly_rows(&self) -> Result<RawTable, SourceError> {
        self.fetch(&self.ranges.monthly_range)
    }

    fn daily_rows(&self) -> Result<RawTable, SourceError> {
        self.fetch(&self.ranges.daily_range)
    }
}

/// Local CSV exports of the two sheets.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub monthly: Option<PathBuf>,
    pub daily: Option<PathBuf>,
}

/// Read a whole CSV (first line = header) into a table. Ragged rows are allowed.
pub fn read_csv_table<R: Read>(r: R) -> Result<RawTable, SourceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(r);
    let mut values = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        values.push(rec.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Ok(RawTable::from_values(values))
}

fn read_csv_path(path: &Option<PathBuf>, what: &'static str) -> Result<RawTable, SourceError> {
    let path = path.as_ref().ok_or(SourceError::NotConfigured(what))?;
    let file = std::fs::File::open(path)?;
    let table = read_csv_table(file)?;
    if table.header.is_empty() {
        return Err(SourceError::EmptySheet(path.display().to_string()));
    }
    info!(path = %path.display(), rows = table.rows.len(), "loaded csv ledger");
    Ok(table)
}

impl RowSource for CsvSource {
    fn monthly_rows(&self) -> Result<RawTable, SourceError> {
        read_csv_path(&self.monthly, "monthly csv")
    }

    fn daily_rows(&self) -> Result<RawTable, SourceError> {
        read_csv_path(&self.daily, "daily csv")
    }
}
