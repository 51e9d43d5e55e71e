// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is terminal: `main` logs it and exits with status 1.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::model::RequiredField;

#[derive(Error, Debug)]
pub enum MailgateError {
    #[error("missing required input(s): {}", join_fields(.0))]
    MissingRequiredField(Vec<RequiredField>),

    #[error("invalid service account credential: {0}")]
    InvalidCredential(#[from] CredentialError),

    #[error("at least one input source (CSV file or Google Spreadsheet ID) must be provided")]
    MissingInputSource,

    #[error("invalid CSV input: {0}")]
    InvalidCsv(#[from] CsvError),

    #[error("at least one mailing mechanism (SendGrid or SMTP) must be provided")]
    MissingMailingMechanism,

    #[error("specified passwords file '{}' does not exist", .0.display())]
    MissingPasswordsFile(PathBuf),

    #[error("mailer command failed: {0}")]
    ExternalProcessFailure(ProcessFailure),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why the `SERVICE_ACCOUNT_JSON` value could not be resolved.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credential file '{}' is not valid JSON: {source}", path.display())]
    FileNotJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("credential file '{}' could not be read: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("value is neither an existing file path nor a JSON document")]
    NotPathOrJson,

    #[error("could not write temporary credential file: {0}")]
    Materialize(String),
}

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("specified CSV file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("specified CSV file could not be opened: {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("specified CSV file is not valid: {}: {source}", path.display())]
    Malformed { path: PathBuf, source: csv::Error },
}

#[derive(Error, Debug)]
pub enum ProcessFailure {
    #[error("exited with status {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, MailgateError>;
