// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn pin_arg() -> Arg {
    Arg::new("pin")
        .long("pin")
        .required(true)
        .help("Access PIN for sensitive views")
}

pub fn build_cli() -> Command {
    Command::new("salesboard")
        .about("Sales-performance KPIs, quota projections and commission estimates")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Report config YAML (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("monthly-csv")
                .long("monthly-csv")
                .global(true)
                .help("Read the monthly ledger from a CSV export instead of the sheets API"),
        )
        .arg(
            Arg::new("daily-csv")
                .long("daily-csv")
                .global(true)
                .help("Read the daily ledger from a CSV export instead of the sheets API"),
        )
        .arg(
            Arg::new("days-elapsed")
                .long("days-elapsed")
                .global(true)
                .value_parser(value_parser!(u32))
                .help("Override days elapsed in the period"),
        )
        .arg(
            Arg::new("business-days")
                .long("business-days")
                .global(true)
                .value_parser(value_parser!(u32))
                .help("Override business days elapsed"),
        )
        .arg(
            Arg::new("business-days-remaining")
                .long("business-days-remaining")
                .global(true)
                .value_parser(value_parser!(u32))
                .help("Override business days remaining"),
        )
        .subcommand(json_flags(
            Command::new("monthly").about("Monthly panel: per-seller KPIs, totals and highlights"),
        ))
        .subcommand(json_flags(
            Command::new("daily").about("Daily panel: today's acceptances against the daily goal"),
        ))
        .subcommand(json_flags(
            Command::new("indicators")
                .about("Recovery plan, breakdowns and daily acceptance (PIN required)")
                .arg(pin_arg())
                .arg(Arg::new("from").long("from").help("First day (DD/MM/YYYY or YYYY-MM-DD)"))
                .arg(Arg::new("to").long("to").help("Last day (DD/MM/YYYY or YYYY-MM-DD)"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .action(ArgAction::Append)
                        .help("Only these statuses (repeatable, e.g. PAGO)"),
                )
                .arg(
                    Arg::new("origin")
                        .long("origin")
                        .action(ArgAction::Append)
                        .help("Only these lead origins (repeatable)"),
                )
                .arg(
                    Arg::new("acceptance")
                        .long("acceptance")
                        .value_parser(["accepted", "pending"])
                        .help("Only accepted or only not-yet-accepted sales"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("projection")
                .about("Commission buckets and gross/net revenue projection (manager PIN)")
                .arg(pin_arg()),
        ))
        .subcommand(
            Command::new("export")
                .about("Export report data")
                .subcommand(
                    Command::new("monthly")
                        .about("Monthly per-seller rows including Total")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("doctor").about("Data quality: unrostered sellers, unreadable cells"),
        ))
        .subcommand(
            Command::new("config")
                .about("Inspect configuration")
                .subcommand(Command::new("show").about("Print the effective config as YAML"))
                .subcommand(Command::new("path").about("Print the default config path")),
        )
}
