// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Commission buckets and the gross/net revenue projection.

use crate::models::{Product, SaleRecord, Status};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rates paid by the partner banks per bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionRates {
    /// Flat amount per card issued.
    pub card_issued: Decimal,
    /// Fraction of the authorized withdrawal amount.
    pub withdrawal: Decimal,
    pub supplementary_withdrawal: Decimal,
    pub free_margin: Decimal,
    /// Expected share of issued cards that get activated.
    pub activation_ratio: Decimal,
    /// Flat amount per activated card.
    pub activation: Decimal,
}

impl Default for CommissionRates {
    fn default() -> Self {
        Self {
            card_issued: Decimal::new(300, 0),
            withdrawal: Decimal::new(10, 2),
            supplementary_withdrawal: Decimal::new(10, 2),
            free_margin: Decimal::new(7, 2),
            activation_ratio: Decimal::new(20, 2),
            activation: Decimal::new(100, 0),
        }
    }
}

/// Costs taken off the gross projection. Fixed amounts are positive here and
/// subtracted when the projection is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub tax_rate: Decimal,
    pub staff_bonus_rate: Decimal,
    pub campaign: Decimal,
    pub admin_overhead: Decimal,
    pub payroll_overhead: Decimal,
    pub sms_campaign: Decimal,
    pub whatsapp_campaign: Decimal,
    pub benefit_unlock: Vec<Decimal>,
}

impl Default for Deductions {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(16, 2),
            staff_bonus_rate: Decimal::new(15, 2),
            campaign: Decimal::new(500, 0),
            admin_overhead: Decimal::new(18535, 0),
            payroll_overhead: Decimal::new(51782, 0),
            sms_campaign: Decimal::ZERO,
            whatsapp_campaign: Decimal::ZERO,
            benefit_unlock: [1805, 2436, 570, 285, 522, 7650]
                .into_iter()
                .map(|v| Decimal::new(v, 0))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketLine {
    pub label: &'static str,
    /// Unit count or currency amount the rate applies to.
    pub base: Decimal,
    pub commission: Decimal,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionBreakdown {
    pub realised: Vec<BucketLine>,
    pub realised_subtotal: Decimal,
    pub expected: Vec<BucketLine>,
    pub expected_subtotal: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeductionLine {
    pub label: &'static str,
    /// Signed: negative values reduce the projection.
    pub value: Decimal,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueProjection {
    pub gross: Decimal,
    pub deductions: Vec<DeductionLine>,
    pub net: Decimal,
}

fn count(records: &[SaleRecord], status: &Status, card_only: bool) -> Decimal {
    Decimal::from(
        records
            .iter()
            .filter(|r| &r.status == status && (!card_only || r.product.is_card()))
            .count(),
    )
}

fn sum(records: &[SaleRecord], status: &Status, product: &Product) -> Decimal {
    records
        .iter()
        .filter(|r| &r.status == status && &r.product == product)
        .map(|r| r.amount)
        .sum()
}

fn pct(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn flat(amount: Decimal) -> String {
    format!("R$ {}", amount.normalize())
}

fn line(label: &'static str, base: Decimal, rate: Decimal, reference: String) -> BucketLine {
    BucketLine {
        label,
        base,
        commission: base * rate,
        reference,
    }
}

pub fn commission_breakdown(records: &[SaleRecord], rates: &CommissionRates) -> CommissionBreakdown {
    let issued = count(records, &Status::Paid, true);
    let realised = vec![
        line("Cards issued", issued, rates.card_issued, flat(rates.card_issued)),
        line(
            "Withdrawal authorized",
            sum(records, &Status::Paid, &Product::CardWithWithdrawal),
            rates.withdrawal,
            pct(rates.withdrawal),
        ),
        line(
            "Supplementary withdrawal",
            sum(records, &Status::PaidPayout, &Product::SupplementaryWithdrawal),
            rates.supplementary_withdrawal,
            pct(rates.supplementary_withdrawal),
        ),
        line(
            "Free margin",
            sum(records, &Status::PaidPayout, &Product::FreeMargin),
            rates.free_margin,
            pct(rates.free_margin),
        ),
        line("Activated", Decimal::ZERO, rates.activation, pct(rates.activation_ratio)),
    ];

    let expected = vec![
        line(
            "Awaiting approval - issue",
            count(records, &Status::AwaitingApproval, true),
            rates.card_issued,
            flat(rates.card_issued),
        ),
        line(
            "Awaiting approval - withdrawal",
            sum(records, &Status::AwaitingApproval, &Product::CardWithWithdrawal),
            rates.withdrawal,
            pct(rates.withdrawal),
        ),
        line(
            "Blocked - issue",
            count(records, &Status::Blocked, true),
            rates.card_issued,
            flat(rates.card_issued),
        ),
        line(
            "Blocked - withdrawal",
            sum(records, &Status::Blocked, &Product::CardWithWithdrawal),
            rates.withdrawal,
            pct(rates.withdrawal),
        ),
        line(
            "Awaiting approval - supplementary withdrawal",
            sum(records, &Status::AwaitingPayout, &Product::SupplementaryWithdrawal),
            rates.supplementary_withdrawal,
            pct(rates.supplementary_withdrawal),
        ),
        line(
            "Awaiting approval - free margin",
            sum(records, &Status::AwaitingPayout, &Product::FreeMargin),
            rates.free_margin,
            pct(rates.free_margin),
        ),
        line(
            "Activation expectation",
            issued * rates.activation_ratio,
            rates.activation,
            pct(rates.activation_ratio),
        ),
    ];

    let realised_subtotal: Decimal = realised.iter().map(|l| l.commission).sum();
    let expected_subtotal: Decimal = expected.iter().map(|l| l.commission).sum();
    CommissionBreakdown {
        realised,
        realised_subtotal,
        expected,
        expected_subtotal,
        total: realised_subtotal + expected_subtotal,
    }
}

pub fn revenue_projection(gross: Decimal, d: &Deductions) -> RevenueProjection {
    let benefit: Decimal = d.benefit_unlock.iter().copied().sum();
    let deductions = vec![
        DeductionLine {
            label: "Tax",
            value: -(gross * d.tax_rate),
            reference: pct(d.tax_rate),
        },
        DeductionLine {
            label: "Staff bonus",
            value: -(gross * d.staff_bonus_rate),
            reference: pct(d.staff_bonus_rate),
        },
        DeductionLine {
            label: "Campaigns",
            value: -d.campaign,
            reference: String::new(),
        },
        DeductionLine {
            label: "Administrative expenses",
            value: -d.admin_overhead,
            reference: String::new(),
        },
        DeductionLine {
            label: "Payroll expenses",
            value: -d.payroll_overhead,
            reference: String::new(),
        },
        DeductionLine {
            label: "SMS campaigns",
            value: -d.sms_campaign,
            reference: String::new(),
        },
        DeductionLine {
            label: "WhatsApp campaigns",
            value: -d.whatsapp_campaign,
            reference: String::new(),
        },
        DeductionLine {
            label: "Benefit unlock",
            value: -benefit,
            reference: String::new(),
        },
    ];
    let net = gross + deductions.iter().map(|l| l.value).sum::<Decimal>();
    RevenueProjection {
        gross,
        deductions,
        net,
    }
}
