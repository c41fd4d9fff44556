// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report configuration (YAML file) and process environment settings.

use crate::commission::{CommissionRates, Deductions};
use crate::error::ConfigError;
use crate::models::SalespersonTarget;
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Salesboard", "salesboard"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetRanges {
    pub monthly_range: String,
    pub daily_range: String,
}

impl Default for SheetRanges {
    fn default() -> Self {
        Self {
            monthly_range: "Fev".into(),
            daily_range: "DIÁRIO!C7:K21".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Sales dated on or before this day are carried-over stock.
    pub cutoff_date: NaiveDate,
    /// Single reporting day that all carried-over stock is filed under.
    pub bucket_date: NaiveDate,
    pub rates: CommissionRates,
    pub deductions: Deductions,
    pub roster: Vec<SalespersonTarget>,
    pub sheets: SheetRanges,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cutoff_date: ymd(2025, 1, 30),
            bucket_date: ymd(2025, 1, 31),
            rates: CommissionRates::default(),
            deductions: Deductions::default(),
            roster: default_roster(),
            sheets: SheetRanges::default(),
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn target(
    name: &str,
    quota: u32,
    withdrawal: i64,
    start: Option<(i32, u32, u32)>,
    active: bool,
) -> SalespersonTarget {
    SalespersonTarget {
        salesperson: name.into(),
        card_quota: quota,
        withdrawal_quota: Decimal::new(withdrawal, 0),
        start_date: start.map(|(y, m, d)| ymd(y, m, d)),
        active,
    }
}

pub fn default_roster() -> Vec<SalespersonTarget> {
    vec![
        target("ROSIMERY", 60, 20000, Some((2024, 8, 14)), true),
        target("ELLEN", 45, 15000, Some((2025, 1, 8)), true),
        target("ISABEL", 60, 20000, Some((2024, 8, 26)), true),
        target("ANTONIO", 45, 15000, Some((2025, 1, 9)), true),
        target("DANILO", 45, 15000, Some((2025, 1, 9)), true),
        target("DANIEL", 20, 0, Some((2024, 12, 4)), true),
        target("VICTOR SILVA", 20, 0, Some((2024, 11, 6)), true),
        target("VICTOR", 20, 0, Some((2024, 10, 9)), true),
        target("CALL CENTER - SAIU", 20, 0, None, false),
        target("LARISSA", 30, 0, Some((2024, 2, 4)), true),
        target("JOAO", 30, 0, Some((2024, 2, 4)), true),
        target("ANNA", 20, 0, Some((2024, 12, 4)), true),
        target("CALL CENTER - TESTE", 0, 0, None, false),
    ]
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(ConfigError::NoConfigDir)?;
    Ok(proj.config_dir().join("salesboard.yaml"))
}

/// Load the report configuration.
///
/// An explicit path must exist. Without one, the platform config file is used
/// when present and the built-in defaults otherwise.
pub fn load_report_config(path: Option<&Path>) -> Result<ReportConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                debug!(path = %p.display(), "no config file, using defaults");
                return Ok(ReportConfig::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)?;
    let cfg = parse_report_config(&raw)?;
    info!(path = %path.display(), roster = cfg.roster.len(), "loaded config");
    Ok(cfg)
}

pub fn parse_report_config(raw: &str) -> Result<ReportConfig, ConfigError> {
    Ok(serde_yaml::from_str(raw)?)
}

/// Secrets and endpoints read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub spreadsheet_id: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub manager_pin: Option<String>,
    pub supervisor_pin: Option<String>,
}

/// Load `.env` (if any) and read settings from the process environment.
pub fn load_env_settings() -> Result<EnvSettings, ConfigError> {
    dotenvy::dotenv().ok();
    build_env_settings(|key| std::env::var(key))
}

/// Core env parsing, decoupled from the process environment for tests.
pub fn build_env_settings<F>(lookup: F) -> Result<EnvSettings, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let pin = |var: &str| -> Result<Option<String>, ConfigError> {
        match optional(var) {
            Some(v) if !v.chars().all(|c| c.is_ascii_digit()) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "PIN must contain only digits".into(),
            }),
            other => Ok(other),
        }
    };

    Ok(EnvSettings {
        spreadsheet_id: optional("SPREADSHEET_ID"),
        api_key: optional("SHEETS_API_KEY"),
        bearer_token: optional("SHEETS_TOKEN"),
        manager_pin: pin("MANAGER_PIN")?,
        supervisor_pin: pin("SUPERVISOR_PIN")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Result<String, std::env::VarError> {
        move |k: &str| {
            map.get(k)
                .map(|v| v.to_string())
                .ok_or(std::env::VarError::NotPresent)
        }
    }

    #[test]
    fn env_settings_trim_and_skip_blank() {
        let s = build_env_settings(lookup(HashMap::from([
            ("SPREADSHEET_ID", " abc "),
            ("SHEETS_API_KEY", ""),
            ("MANAGER_PIN", "1234"),
        ])))
        .unwrap();
        assert_eq!(s.spreadsheet_id.as_deref(), Some("abc"));
        assert_eq!(s.api_key, None);
        assert_eq!(s.manager_pin.as_deref(), Some("1234"));
        assert_eq!(s.supervisor_pin, None);
    }

    #[test]
    fn non_numeric_pin_is_rejected() {
        let err = build_env_settings(lookup(HashMap::from([("SUPERVISOR_PIN", "12a4")])))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SUPERVISOR_PIN"));
    }

    #[test]
    fn default_roster_total_quota() {
        let total: u32 = default_roster().iter().map(|t| t.card_quota).sum();
        assert_eq!(total, 415);
    }
}
