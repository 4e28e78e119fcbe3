//! Reverse proxy container entrypoint.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment ──▶ resolver ──▶ replacements ─┐
//!                                               ▼
//!   template file ──▶ read ──▶ substitution ──▶ write ──▶ template file
//!                                                              │
//!                                                              ▼
//!   stdout ◀── relay task ◀── child stdout ◀── supervisor (spawn + wait)
//! ```
//!
//! Usage: `proxy-entrypoint [-c PATH] [--settings PATH] [--defaults inert|apply] [--] COMMAND [ARGS...]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use proxy_entrypoint::config::{load_config, ConfigError, EntrypointConfig};
use proxy_entrypoint::lifecycle;
use proxy_entrypoint::observability::logging;
use proxy_entrypoint::template::{DefaultPolicy, Environment};
use proxy_entrypoint::CommandSpec;

#[derive(Parser, Debug)]
#[command(name = "proxy-entrypoint")]
#[command(about = "Render the proxy config from env vars, then run the proxy", long_about = None)]
struct Cli {
    /// Config template to rewrite in place [default: /etc/traefik/traefik.toml]
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Entrypoint settings file (TOML)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Whether unset optional variables get their default
    #[arg(long, value_enum)]
    defaults: Option<DefaultPolicy>,

    /// Command to run once the config is written
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

impl Cli {
    /// Settings file (or defaults) with flag overrides applied.
    fn into_config(self) -> Result<(EntrypointConfig, CommandSpec), ConfigError> {
        let mut config = match &self.settings {
            Some(path) => load_config(path)?,
            None => EntrypointConfig::default(),
        };

        if let Some(path) = self.config {
            config.template.path = path;
        }
        if let Some(defaults) = self.defaults {
            config.template.defaults = defaults;
        }

        Ok((config, CommandSpec::new(self.command)))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, command) = match cli.into_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        template = %config.template.path.display(),
        command = %command,
        "proxy-entrypoint starting"
    );

    let env = Environment::from_process();

    match lifecycle::run(&config, &env, &command).await {
        Ok(outcome) => {
            tracing::info!(status = %outcome.status, "Command finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Entrypoint failed");
            ExitCode::from(e.exit_code())
        }
    }
}
