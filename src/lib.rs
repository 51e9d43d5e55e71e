// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;

use anyhow::Context;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{RawConfig, ResolvedCredential, load_from_env, validate};
use crate::errors::Result;
use crate::exec::{Invocation, run_invocation};
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
///
/// Reads the environment, validates it, and runs the mailer once.
pub async fn run(args: CliArgs) -> Result<()> {
    info!("starting IntegriMark mailing");
    let raw = load_from_env();
    run_with(raw, &RealFileSystem, &args).await
}

/// Validate `raw` against `fs`, build the mailer command and execute it
/// (or print it, with `--dry-run`).
///
/// A temporary credential file created during validation is removed when
/// this function returns, after the mailer has finished.
pub async fn run_with(raw: RawConfig, fs: &dyn FileSystem, args: &CliArgs) -> Result<()> {
    info!("validating inputs");
    let resolved = validate(raw, fs)?;
    let invocation = Invocation::build(&resolved, &args.mailer);

    if args.dry_run {
        print_dry_run(&dry_run_view(&invocation, resolved.credential()))?;
        return Ok(());
    }

    let outcome = run_invocation(&invocation, args.timeout()).await?;
    outcome.into_result()?;

    info!("IntegriMark mailing executed successfully");
    Ok(())
}

/// Shown instead of a temporary credential path, which is gone once the
/// dry-run returns.
const TEMP_CREDENTIAL_PLACEHOLDER: &str = "<temporary file, removed after run>";

/// The invocation as reported by `--dry-run`: secrets masked, and a
/// materialised credential replaced by [`TEMP_CREDENTIAL_PLACEHOLDER`].
fn dry_run_view(invocation: &Invocation, credential: Option<&ResolvedCredential>) -> Invocation {
    let mut view = invocation.redacted();
    if let Some(ResolvedCredential::Materialized(artifact)) = credential {
        let temp_path = artifact.path().to_string_lossy();
        for (_, value) in view.env.iter_mut().filter(|(_, v)| *v == temp_path) {
            *value = TEMP_CREDENTIAL_PLACEHOLDER.to_string();
        }
    }
    view
}

/// Dry-run output: the command that would run.
fn print_dry_run(invocation: &Invocation) -> Result<()> {
    let json = serde_json::to_string_pretty(invocation)
        .context("serializing invocation for dry-run")?;
    println!("{json}");
    Ok(())
}
