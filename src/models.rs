// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A rectangular sheet: header row plus string-valued data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Split a values grid (first row = header), as returned by the sheets API.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let header = values.remove(0);
        Self {
            header,
            rows: values,
        }
    }

    /// Index of the column whose trimmed header equals `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Cell text, empty for short rows.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Paid,
    AwaitingApproval,
    Blocked,
    Pending,
    Cancelled,
    /// "PAGO_": paid marker used by the consigned-credit products.
    PaidPayout,
    /// "AG. INSS_": awaiting marker used by the consigned-credit products.
    AwaitingPayout,
    Unknown(String),
}

impl Status {
    pub fn from_cell(s: &str) -> Self {
        match s.trim() {
            "PAGO" => Status::Paid,
            "AG. INSS" => Status::AwaitingApproval,
            "BLOQUEADO" => Status::Blocked,
            "PENDENTE" => Status::Pending,
            "CANCELADO" => Status::Cancelled,
            "PAGO_" => Status::PaidPayout,
            "AG. INSS_" => Status::AwaitingPayout,
            other => Status::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Status::Paid => "PAGO",
            Status::AwaitingApproval => "AG. INSS",
            Status::Blocked => "BLOQUEADO",
            Status::Pending => "PENDENTE",
            Status::Cancelled => "CANCELADO",
            Status::PaidPayout => "PAGO_",
            Status::AwaitingPayout => "AG. INSS_",
            Status::Unknown(s) => s,
        }
    }

    /// One of the five statuses shown on the headline cards.
    pub fn is_base(&self) -> bool {
        matches!(
            self,
            Status::Paid
                | Status::AwaitingApproval
                | Status::Blocked
                | Status::Pending
                | Status::Cancelled
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Status::Unknown(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    CardNoWithdrawal,
    CardWithWithdrawal,
    FreeMargin,
    SupplementaryWithdrawal,
    Unknown(String),
}

impl Product {
    pub fn from_cell(s: &str) -> Self {
        match s.trim() {
            "Cartão sem Saque" => Product::CardNoWithdrawal,
            "Cartão com Saque" => Product::CardWithWithdrawal,
            "Margem Livre" => Product::FreeMargin,
            "Saque Complementar" => Product::SupplementaryWithdrawal,
            other => Product::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Product::CardNoWithdrawal => "Cartão sem Saque",
            Product::CardWithWithdrawal => "Cartão com Saque",
            Product::FreeMargin => "Margem Livre",
            Product::SupplementaryWithdrawal => "Saque Complementar",
            Product::Unknown(s) => s,
        }
    }

    pub fn is_card(&self) -> bool {
        matches!(self, Product::CardNoWithdrawal | Product::CardWithWithdrawal)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Product::Unknown(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Current,
    Other,
}

impl Profile {
    pub fn from_cell(s: &str) -> Self {
        if s.trim() == "ATUAL" {
            Profile::Current
        } else {
            Profile::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceStatus {
    Accepted,
    PendingAcceptance,
}

impl AcceptanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AcceptanceStatus::Accepted => "ACEITE",
            AcceptanceStatus::PendingAcceptance => "PEND. ACEITE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub salesperson: String,
    pub status: Status,
    pub product: Product,
    pub origin: String,
    /// Benefit type ("Espécie"), free text.
    pub species: String,
    pub bank: String,
    pub amount: Decimal,
    /// `None` only when the date cell was unreadable.
    pub date: Option<NaiveDate>,
    pub profile: Profile,
}

impl SaleRecord {
    pub fn acceptance_status(&self) -> AcceptanceStatus {
        match self.status {
            Status::Paid | Status::AwaitingApproval | Status::Blocked => {
                AcceptanceStatus::Accepted
            }
            _ => AcceptanceStatus::PendingAcceptance,
        }
    }

    /// Counts toward the attrition (pending) column.
    pub fn is_attrition(&self) -> bool {
        match self.status {
            Status::Pending => self.profile == Profile::Current,
            Status::Cancelled => true,
            _ => false,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalespersonTarget {
    pub salesperson: String,
    pub card_quota: u32,
    #[serde(default)]
    pub withdrawal_quota: Decimal,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inactive logins (tests, departures) stay in the monthly table only.
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub days_elapsed: u32,
    pub business_days_elapsed: u32,
    pub business_days_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateRow {
    pub salesperson: String,
    pub card_quota: u32,
    pub withdrawal_quota: Decimal,
    pub paid_count: u32,
    pub awaiting_count: u32,
    pub blocked_count: u32,
    pub pending_count: u32,
    pub amount_paid: Decimal,
    pub typed_count: u32,
    pub accepted_count: u32,
    /// Fraction in [0, 1].
    pub conversion_rate: Decimal,
    pub projected_count: u32,
    /// Fraction of the card quota; may exceed 1.
    pub attainment_rate: Decimal,
    /// Eligible for highlights and the recovery panel. False on the Total row.
    pub active: bool,
}
