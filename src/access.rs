// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use subtle::ConstantTimeEq;

/// Which sensitive views a PIN unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Denied,
    /// Recovery panel and daily acceptance.
    Supervisor,
    /// Everything, including distributions and the revenue projection.
    Manager,
}

fn pin_matches(entered: &str, expected: Option<&str>) -> bool {
    match expected {
        Some(e) if !e.is_empty() => bool::from(entered.as_bytes().ct_eq(e.as_bytes())),
        _ => false,
    }
}

impl AccessLevel {
    pub fn from_pin(entered: &str, manager: Option<&str>, supervisor: Option<&str>) -> Self {
        let entered = entered.trim();
        if entered.is_empty() || !entered.chars().all(|c| c.is_ascii_digit()) {
            return AccessLevel::Denied;
        }
        if pin_matches(entered, manager) {
            AccessLevel::Manager
        } else if pin_matches(entered, supervisor) {
            AccessLevel::Supervisor
        } else {
            AccessLevel::Denied
        }
    }

    pub fn can_view_recovery(&self) -> bool {
        *self >= AccessLevel::Supervisor
    }

    pub fn can_view_projection(&self) -> bool {
        *self == AccessLevel::Manager
    }

    pub fn can_view_distributions(&self) -> bool {
        *self == AccessLevel::Manager
    }
}
