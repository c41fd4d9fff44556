// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use thiserror::Error;

/// Recoverable problems found while normalizing ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Amount cell could not be read; the record carries 0.
    MalformedAmount,
    /// Date cell could not be read; the record is left out of dated views.
    MalformedDate,
    /// Status or product outside the known set; kept as `Unknown`.
    UnknownEnumValue,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IssueKind::MalformedAmount => "malformed_amount",
            IssueKind::MalformedDate => "malformed_date",
            IssueKind::UnknownEnumValue => "unknown_enum_value",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub column: &'static str,
    pub value: String,
    pub kind: IssueKind,
}

/// Errors that abort report generation. No partial report is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("missing reporting parameter: {0}")]
    MissingReportingParameter(&'static str),

    #[error("ledger is missing required column '{0}'")]
    MissingColumn(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not determine platform-specific config dir")]
    NoConfigDir,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sheet '{0}' returned no rows")]
    EmptySheet(String),

    #[error("spreadsheet source not configured: {0}")]
    NotConfigured(&'static str),
}
