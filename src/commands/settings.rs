// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{ReportConfig, default_config_path};
use anyhow::Result;

pub fn handle(config: &ReportConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => print!("{}", serde_yaml::to_string(config)?),
        Some(("path", _)) => println!("{}", default_config_path()?.display()),
        _ => {}
    }
    Ok(())
}
