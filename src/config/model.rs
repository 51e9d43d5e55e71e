// src/config/model.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::fs::TempArtifact;

pub const DEFAULT_SMTP_PORT: &str = "587";
pub const DEFAULT_PASSWORDS_FILE: &str = "passwords.json";
pub const DEFAULT_EMAIL_STATUS_FILE: &str = "email-status.json";
pub const DEFAULT_NO_SEND_MODE: &str = "false";

/// Mailing configuration exactly as found in the environment.
///
/// Values are unparsed strings. Empty values are already folded into `None`
/// (or into the default, for the keys that have one) by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub sendgrid_api_key: Option<String>,
    /// Either a path to a JSON document or the JSON document itself.
    pub service_account_json: Option<String>,
    pub smtp_server: Option<String>,
    pub smtp_port: String,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,

    pub from_email: Option<String>,
    pub csv_input_file: Option<String>,
    pub google_spreadsheet_id: Option<String>,
    pub google_worksheet_index: Option<String>,
    pub email_column: Option<String>,
    pub files_column: Option<String>,
    pub passwords: String,
    pub template_file: Option<String>,
    pub email_status_file: String,
    pub no_send_mode: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            sendgrid_api_key: None,
            service_account_json: None,
            smtp_server: None,
            smtp_port: DEFAULT_SMTP_PORT.to_string(),
            smtp_username: None,
            smtp_password: None,
            from_email: None,
            csv_input_file: None,
            google_spreadsheet_id: None,
            google_worksheet_index: None,
            email_column: None,
            files_column: None,
            passwords: DEFAULT_PASSWORDS_FILE.to_string(),
            template_file: None,
            email_status_file: DEFAULT_EMAIL_STATUS_FILE.to_string(),
            no_send_mode: DEFAULT_NO_SEND_MODE.to_string(),
        }
    }
}

impl RawConfig {
    /// `no-send-mode` is on only for a case-insensitive `"true"`.
    pub fn no_send(&self) -> bool {
        self.no_send_mode.eq_ignore_ascii_case("true")
    }

    /// True when server, username and password are all set.
    pub fn has_complete_smtp(&self) -> bool {
        self.smtp_server.is_some() && self.smtp_username.is_some() && self.smtp_password.is_some()
    }
}

/// Inputs the mailer cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    FromEmail,
    EmailColumn,
}

impl RequiredField {
    pub fn key(self) -> &'static str {
        match self {
            RequiredField::FromEmail => "from-email",
            RequiredField::EmailColumn => "email-column",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RequiredField::FromEmail => {
                "the email address from which all emails will be sent"
            }
            RequiredField::EmailColumn => {
                "the column in the CSV or Google Spreadsheet that contains the email addresses of the recipients"
            }
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The service-account credential after resolution.
///
/// Whatever the input form, the path refers to a file whose contents parse
/// as JSON.
#[derive(Debug)]
pub enum ResolvedCredential {
    /// The input was already a path to a JSON file.
    File(PathBuf),
    /// The input was inline JSON, written out to a temporary file that lives
    /// as long as this value.
    Materialized(TempArtifact),
}

impl ResolvedCredential {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedCredential::File(path) => path,
            ResolvedCredential::Materialized(artifact) => artifact.path(),
        }
    }
}

/// Configuration that passed every validation rule.
///
/// Only constructed by the validation engine.
#[derive(Debug)]
pub struct ResolvedConfig {
    config: RawConfig,
    credential: Option<ResolvedCredential>,
}

impl ResolvedConfig {
    pub(crate) fn new_unchecked(config: RawConfig, credential: Option<ResolvedCredential>) -> Self {
        Self { config, credential }
    }

    pub fn config(&self) -> &RawConfig {
        &self.config
    }

    pub fn credential(&self) -> Option<&ResolvedCredential> {
        self.credential.as_ref()
    }

    pub fn credential_path(&self) -> Option<&Path> {
        self.credential.as_ref().map(ResolvedCredential::path)
    }
}
