// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod daily;
pub mod doctor;
pub mod exporter;
pub mod indicators;
pub mod monthly;
pub mod projection;
pub mod settings;

use crate::access::AccessLevel;
use crate::aggregate::{MonthlyReport, aggregate};
use crate::config::{EnvSettings, ReportConfig, load_env_settings, load_report_config};
use crate::models::{RawTable, ReportingPeriod};
use crate::normalize::{NormalizeOptions, NormalizedLedger, normalize_ledger, reporting_period};
use crate::sheets::{CsvSource, RowSource, SheetsAuth, SheetsSource};
use crate::utils::http_client;
use anyhow::{Context as _, Result, anyhow, bail};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Reporting scalars given on the command line; each replaces the sheet value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodOverride {
    pub days_elapsed: Option<u32>,
    pub business_days_elapsed: Option<u32>,
    pub business_days_remaining: Option<u32>,
}

impl PeriodOverride {
    fn complete(&self) -> Option<ReportingPeriod> {
        Some(ReportingPeriod {
            days_elapsed: self.days_elapsed?,
            business_days_elapsed: self.business_days_elapsed?,
            business_days_remaining: self.business_days_remaining?,
        })
    }

    fn apply(&self, p: ReportingPeriod) -> ReportingPeriod {
        ReportingPeriod {
            days_elapsed: self.days_elapsed.unwrap_or(p.days_elapsed),
            business_days_elapsed: self.business_days_elapsed.unwrap_or(p.business_days_elapsed),
            business_days_remaining: self
                .business_days_remaining
                .unwrap_or(p.business_days_remaining),
        }
    }
}

/// Everything a command needs for one report cycle.
pub struct Context {
    pub config: ReportConfig,
    pub env: EnvSettings,
    pub period: PeriodOverride,
    source: Option<Box<dyn RowSource>>,
}

impl Context {
    pub fn new(
        config: ReportConfig,
        env: EnvSettings,
        period: PeriodOverride,
        source: Option<Box<dyn RowSource>>,
    ) -> Self {
        Self {
            config,
            env,
            period,
            source,
        }
    }

    /// Build from the top-level matches: config file, `.env`, and row source.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let config_path = m.get_one::<String>("config").map(PathBuf::from);
        let config = load_report_config(config_path.as_deref()).context("Load report config")?;
        let env = load_env_settings().context("Read environment")?;
        let period = PeriodOverride {
            days_elapsed: m.get_one::<u32>("days-elapsed").copied(),
            business_days_elapsed: m.get_one::<u32>("business-days").copied(),
            business_days_remaining: m.get_one::<u32>("business-days-remaining").copied(),
        };
        let monthly_csv = m.get_one::<String>("monthly-csv").map(PathBuf::from);
        let daily_csv = m.get_one::<String>("daily-csv").map(PathBuf::from);
        let source = build_source(&config, &env, monthly_csv, daily_csv)?;
        Ok(Self::new(config, env, period, source))
    }

    pub fn rows(&self) -> Result<&dyn RowSource> {
        self.source.as_deref().ok_or_else(|| {
            anyhow!(
                "No ledger source: pass --monthly-csv/--daily-csv or set SPREADSHEET_ID with SHEETS_API_KEY or SHEETS_TOKEN"
            )
        })
    }

    pub fn access(&self, pin: &str) -> AccessLevel {
        AccessLevel::from_pin(
            pin,
            self.env.manager_pin.as_deref(),
            self.env.supervisor_pin.as_deref(),
        )
    }

    /// Fetch and normalize the monthly ledger, and settle the reporting period.
    pub fn monthly_ledger(&self) -> Result<(NormalizedLedger, ReportingPeriod)> {
        let table = self
            .rows()?
            .monthly_rows()
            .context("Fetch monthly ledger")?;
        let ledger = normalize_ledger(&table, &NormalizeOptions::from(&self.config))
            .context("Normalize monthly ledger")?;
        let period = self.resolve_period(&table)?;
        Ok((ledger, period))
    }

    fn resolve_period(&self, table: &RawTable) -> Result<ReportingPeriod> {
        if let Some(p) = self.period.complete() {
            return Ok(p);
        }
        let from_sheet = reporting_period(table).context("Read reporting period from ledger")?;
        let p = self.period.apply(from_sheet);
        debug!(?p, "reporting period");
        Ok(p)
    }

    pub fn monthly_report(&self) -> Result<(NormalizedLedger, MonthlyReport)> {
        let (ledger, period) = self.monthly_ledger()?;
        let report = aggregate(&ledger.records, &self.config.roster, &period)?;
        Ok((ledger, report))
    }

    pub fn daily_table(&self) -> Result<RawTable> {
        self.rows()?.daily_rows().context("Fetch daily ledger")
    }
}

fn build_source(
    config: &ReportConfig,
    env: &EnvSettings,
    monthly_csv: Option<PathBuf>,
    daily_csv: Option<PathBuf>,
) -> Result<Option<Box<dyn RowSource>>> {
    if monthly_csv.is_some() || daily_csv.is_some() {
        return Ok(Some(Box::new(CsvSource {
            monthly: monthly_csv,
            daily: daily_csv,
        })));
    }
    let Some(id) = env.spreadsheet_id.as_deref() else {
        return Ok(None);
    };
    let auth = match (&env.api_key, &env.bearer_token) {
        (Some(k), _) => SheetsAuth::ApiKey(k.clone()),
        (None, Some(t)) => SheetsAuth::Bearer(t.clone()),
        (None, None) => {
            warn!("SPREADSHEET_ID set without SHEETS_API_KEY or SHEETS_TOKEN");
            return Ok(None);
        }
    };
    let client = http_client()?;
    Ok(Some(Box::new(SheetsSource::new(
        client,
        id,
        auth,
        config.sheets.clone(),
    ))))
}

/// Reject PINs whose level fails `allowed`.
pub fn require_access(
    ctx: &Context,
    sub: &clap::ArgMatches,
    allowed: impl Fn(&AccessLevel) -> bool,
) -> Result<AccessLevel> {
    let pin = sub.get_one::<String>("pin").map(String::as_str).unwrap_or("");
    let level = ctx.access(pin);
    if !allowed(&level) {
        bail!("PIN not recognised for this view");
    }
    Ok(level)
}
