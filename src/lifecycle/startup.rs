//! Startup orchestration.
//!
//! # Responsibilities
//! - Check the template exists before doing anything else
//! - Resolve the environment, render the template, write it back
//! - Hand control to the supervised command
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steps run in order, never concurrently
//! - The command starts only after the rewritten template is on disk

use tokio::io::AsyncWrite;

use crate::config::{validate_catalog, ConfigError, EntrypointConfig, TemplateConfig};
use crate::error::Result;
use crate::supervisor::{CommandSpec, ExitOutcome, Supervisor};
use crate::template::{
    list_variables, missing_placeholders, substitute, Environment, FileStore, Resolver,
    TemplateStore,
};

/// Hint printed when no command follows the flags.
pub const NO_COMMAND_HINT: &str =
    "You must provide a command to run after entrypoint process completes. You probably want: /traefik";

/// Render the template held by `store` and write it back.
///
/// Returns the number of replacements applied.
pub fn render<S: TemplateStore>(
    store: &S,
    env: &Environment,
    config: &TemplateConfig,
) -> Result<usize> {
    validate_catalog(list_variables()).map_err(ConfigError::Validation)?;

    let replacements = Resolver::new(config.defaults).resolve(env)?;
    let template = store.read()?;

    if config.warn_missing_placeholders {
        for name in missing_placeholders(&template, list_variables())? {
            tracing::warn!(
                variable = name,
                template = %store.location(),
                "Template has no placeholder for variable"
            );
        }
    }

    let rendered = substitute(template, &replacements)?;
    store.write(&rendered)?;

    tracing::info!(
        template = %store.location(),
        replacements = replacements.len(),
        defaults = ?config.defaults,
        "Template rendered"
    );

    Ok(replacements.len())
}

/// Full entrypoint run against an arbitrary store and output sink.
pub async fn run_with<S, W>(
    store: &S,
    supervisor: Supervisor<W>,
    config: &TemplateConfig,
    env: &Environment,
    command: &CommandSpec,
) -> Result<ExitOutcome>
where
    S: TemplateStore,
    W: AsyncWrite + Unpin + Send + 'static,
{
    store.ensure_exists()?;

    if command.is_empty() {
        tracing::warn!("{}", NO_COMMAND_HINT);
    }

    render(store, env, config)?;

    Ok(supervisor.run(command).await?)
}

/// Render the configured template file, then run `command` relaying to stdout.
pub async fn run(
    config: &EntrypointConfig,
    env: &Environment,
    command: &CommandSpec,
) -> Result<ExitOutcome> {
    let store = FileStore::new(&config.template.path);
    run_with(&store, Supervisor::new(), &config.template, env, command).await
}
