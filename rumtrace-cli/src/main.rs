// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rumtrace CLI
//!
//! Renders browser monitoring headers from an agent config file, for
//! checking a deployment's settings without running the application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rumtrace_core::{build_header, AgentConfig, Transaction};
use rumtrace_telemetry::{init_logging, LogConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rumtrace")]
#[command(about = "Rumtrace - browser monitoring header tool", long_about = None)]
struct Cli {
    /// Agent configuration file (TOML)
    #[arg(short, long, env = "RUMTRACE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header for a synthetic transaction
    Header {
        /// Transaction name
        #[arg(long, default_value = "WebTransaction/Uri/index")]
        name: String,

        /// Render as if called outside any transaction
        #[arg(long)]
        no_transaction: bool,

        /// Force pretty-printed output
        #[arg(long)]
        debug: bool,

        /// Override the application id
        #[arg(long)]
        app_id: Option<u64>,
    },

    /// Print the effective configuration
    Config,
}

fn load_config(path: Option<&Path>) -> Result<AgentConfig> {
    let config = match path {
        Some(path) => AgentConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => AgentConfig::default(),
    };
    Ok(config.apply_env())
}

/// Apply `header` flags on top of the loaded configuration.
fn apply_overrides(config: &mut AgentConfig, debug: bool, app_id: Option<u64>) {
    if debug {
        config.browser_monitoring.debug = true;
    }
    if app_id.is_some() {
        config.application_id = app_id;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    init_logging(&LogConfig::default().with_level(level).with_json(cli.log_json))
        .context("Failed to initialize logging")?;

    let mut config = load_config(cli.config.as_deref())?;
    debug!(config = ?cli.config, "loaded agent configuration");

    match cli.command {
        Commands::Header {
            name,
            no_transaction,
            debug,
            app_id,
        } => {
            apply_overrides(&mut config, debug, app_id);

            let txn = Transaction::new();
            txn.set_name(name);
            txn.end();

            let header = build_header(&config, (!no_transaction).then_some(&txn));
            if let Some(issue) = header.issue() {
                eprintln!("code {}: {}", issue.code(), issue.message());
            }
            println!("{}", header);
        }

        Commands::Config => {
            let rendered = config
                .to_toml_string()
                .context("Failed to render configuration")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
