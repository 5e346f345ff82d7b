// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gantry",
    about = "Boots an isolated agent module into this host process",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Explicit config file (highest-priority layer)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Module locations to load the agent from, in search order.
    /// Overrides [agent].modules from the config when given.
    #[arg(long = "module", value_name = "LOCATION")]
    pub modules: Vec<String>,

    /// Fully-qualified entry type to instantiate.
    /// Overrides [agent].entry_point from the config when given.
    #[arg(long, value_name = "NAME")]
    pub entry_point: Option<String>,

    /// Agent argument string, forwarded verbatim to the constructor.
    /// Overrides [agent].args from the config when given.
    #[arg(long, value_name = "ARGS")]
    pub agent_args: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the merged configuration and exit
    ShowConfig,
}
