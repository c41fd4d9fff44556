// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

const UA: &str = concat!("salesboard/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2}|\d{4})(?:[ T].*)?$").expect("valid regex")
});
static ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T].*)?$").expect("valid regex"));

/// Parse a day-first date (`31/01/2025`, `31-01-25`, `31.01.2025 10:00`) or an ISO date.
pub fn parse_day_first_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(c) = ISO.captures(s) {
        let y: i32 = c[1].parse().ok()?;
        let m: u32 = c[2].parse().ok()?;
        let d: u32 = c[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }
    let c = DAY_FIRST.captures(s)?;
    let d: u32 = c[1].parse().ok()?;
    let m: u32 = c[2].parse().ok()?;
    let mut y: i32 = c[3].parse().ok()?;
    if c[3].len() == 2 {
        y += 2000;
    }
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Largest amount a single ledger cell may carry (R$ 1 trillion). Keeps every
/// ledger-wide sum far from `Decimal::MAX`.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Strict form of [`parse_currency`]: `None` when the cleaned text is not a
/// number, is negative, or exceeds [`max_amount`].
pub fn try_parse_currency(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<Decimal>()
        .ok()
        .filter(|d| !d.is_sign_negative() || d.is_zero())
        .filter(|d| *d <= max_amount())
}

/// Brazilian currency text to a non-negative decimal. Never fails: anything
/// unreadable, missing, negative or out of range is zero.
pub fn parse_currency(s: &str) -> Decimal {
    try_parse_currency(s).unwrap_or(Decimal::ZERO)
}

pub fn round_half_up(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `num / den`, or zero when the denominator is zero.
pub fn ratio(num: impl Into<Decimal>, den: impl Into<Decimal>) -> Decimal {
    let den = den.into();
    if den.is_zero() {
        Decimal::ZERO
    } else {
        num.into() / den
    }
}

/// Rate as a whole percentage, rounded half-up.
pub fn percent(rate: Decimal) -> i64 {
    use rust_decimal::prelude::ToPrimitive;
    round_half_up(rate * Decimal::ONE_HUNDRED)
        .to_i64()
        .unwrap_or_default()
}

pub fn fmt_percent(rate: Decimal) -> String {
    format!("{}%", percent(rate))
}

/// `R$ 1.234.567` (no cents, dot thousands separator).
pub fn fmt_brl(d: &Decimal) -> String {
    format!("R$ {}", fmt_thousands(d))
}

pub fn fmt_thousands(d: &Decimal) -> String {
    let rounded = round_half_up(*d);
    let neg = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if neg { format!("-{}", out) } else { out }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
