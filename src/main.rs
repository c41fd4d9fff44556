// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use salesboard::{cli, commands};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("SALESBOARD_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let ctx = commands::Context::from_matches(&matches)?;

    match matches.subcommand() {
        Some(("monthly", sub)) => commands::monthly::handle(&ctx, sub)?,
        Some(("daily", sub)) => commands::daily::handle(&ctx, sub)?,
        Some(("indicators", sub)) => commands::indicators::handle(&ctx, sub)?,
        Some(("projection", sub)) => commands::projection::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&ctx, sub)?,
        Some(("config", sub)) => commands::settings::handle(&ctx.config, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
