// src/config/credential.rs

//! Resolution of the `SERVICE_ACCOUNT_JSON` value.
//!
//! The value is either a path to a JSON file or the JSON document itself.
//! It is classified by two ordered checks: does the path exist, and failing
//! that, does the value parse as JSON. An existing path is always treated as
//! a path, even when its contents turn out not to be JSON.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::model::ResolvedCredential;
use crate::errors::CredentialError;
use crate::fs::FileSystem;

/// The two accepted shapes of the credential input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialInput {
    FilePath(PathBuf),
    InlineJson(String),
}

impl CredentialInput {
    pub fn classify(value: &str, fs: &dyn FileSystem) -> Result<Self, CredentialError> {
        let path = PathBuf::from(value);
        if fs.exists(&path) {
            return Ok(CredentialInput::FilePath(path));
        }
        if is_valid_json(value) {
            return Ok(CredentialInput::InlineJson(value.to_string()));
        }
        Err(CredentialError::NotPathOrJson)
    }
}

pub fn is_valid_json(s: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(s).is_ok()
}

/// Resolve a credential value to a path whose contents are valid JSON.
pub fn resolve_credential(
    value: &str,
    fs: &dyn FileSystem,
) -> Result<ResolvedCredential, CredentialError> {
    let input = CredentialInput::classify(value, fs)?;
    let resolved = match input {
        CredentialInput::FilePath(path) => {
            debug!(path = %path.display(), "service account credential is a file path");
            let contents = fs
                .read_to_string(&path)
                .map_err(|e| CredentialError::Unreadable {
                    path: path.clone(),
                    reason: format!("{e:#}"),
                })?;
            if let Err(source) = serde_json::from_str::<serde_json::Value>(&contents) {
                return Err(CredentialError::FileNotJson { path, source });
            }
            ResolvedCredential::File(path)
        }
        CredentialInput::InlineJson(json) => {
            debug!("service account credential is an inline JSON document");
            let artifact = fs
                .persist_temp(".json", json.as_bytes())
                .map_err(|e| CredentialError::Materialize(format!("{e:#}")))?;
            ResolvedCredential::Materialized(artifact)
        }
    };

    info!(path = %resolved.path().display(), "using service account JSON file");
    Ok(resolved)
}
