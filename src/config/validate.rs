// src/config/validate.rs

use std::path::Path;

use tracing::{debug, error, info};

use crate::config::credential::resolve_credential;
use crate::config::csv_check::check_csv_file;
use crate::config::model::{RawConfig, RequiredField, ResolvedConfig, ResolvedCredential};
use crate::errors::{MailgateError, Result};
use crate::fs::FileSystem;

/// Per-run state threaded through the rules.
///
/// Rules read `raw` and may fill in `credential`; nothing else is mutated.
#[derive(Debug)]
pub struct Resolution<'a> {
    pub raw: RawConfig,
    pub fs: &'a dyn FileSystem,
    pub credential: Option<ResolvedCredential>,
}

impl<'a> Resolution<'a> {
    pub fn new(raw: RawConfig, fs: &'a dyn FileSystem) -> Self {
        Self {
            raw,
            fs,
            credential: None,
        }
    }

    fn finish(self) -> ResolvedConfig {
        ResolvedConfig::new_unchecked(self.raw, self.credential)
    }
}

pub type Rule = fn(&mut Resolution<'_>) -> Result<()>;

/// Validation rules, in evaluation order.
pub const RULES: &[(&str, Rule)] = &[
    ("required-fields", require_fields),
    ("credential", resolve_service_account),
    ("input-source", require_input_source),
    ("csv-file", check_csv_input),
    ("mailing-mechanism", require_mailing_mechanism),
    ("passwords-file", require_passwords_file),
];

/// Run every rule in order, stopping at the first failure.
pub fn validate(raw: RawConfig, fs: &dyn FileSystem) -> Result<ResolvedConfig> {
    info!("examining consistency of input parameters");

    let mut resolution = Resolution::new(raw, fs);
    for (name, rule) in RULES {
        debug!(rule = *name, "checking");
        rule(&mut resolution)?;
    }

    info!("all inputs are valid");
    Ok(resolution.finish())
}

pub fn require_fields(res: &mut Resolution<'_>) -> Result<()> {
    let mut missing = Vec::new();
    if res.raw.from_email.is_none() {
        missing.push(RequiredField::FromEmail);
    }
    if res.raw.email_column.is_none() {
        missing.push(RequiredField::EmailColumn);
    }

    if missing.is_empty() {
        return Ok(());
    }
    for field in &missing {
        error!(
            field = field.key(),
            "'{}' is a required input. It is {}.",
            field.key(),
            field.description()
        );
    }
    Err(MailgateError::MissingRequiredField(missing))
}

pub fn resolve_service_account(res: &mut Resolution<'_>) -> Result<()> {
    let Some(value) = res.raw.service_account_json.as_deref() else {
        return Ok(());
    };
    res.credential = Some(resolve_credential(value, res.fs)?);
    Ok(())
}

pub fn require_input_source(res: &mut Resolution<'_>) -> Result<()> {
    if res.raw.csv_input_file.is_none() && res.raw.google_spreadsheet_id.is_none() {
        return Err(MailgateError::MissingInputSource);
    }
    Ok(())
}

/// The CSV file is only inspected when no spreadsheet is configured.
pub fn check_csv_input(res: &mut Resolution<'_>) -> Result<()> {
    if res.raw.google_spreadsheet_id.is_some() {
        return Ok(());
    }
    if let Some(csv) = res.raw.csv_input_file.as_deref() {
        check_csv_file(Path::new(csv), res.fs)?;
    }
    Ok(())
}

/// SendGrid key alone, or the full SMTP server/username/password trio.
/// The port always has a value and is not part of the check.
pub fn require_mailing_mechanism(res: &mut Resolution<'_>) -> Result<()> {
    if res.raw.sendgrid_api_key.is_some() || res.raw.has_complete_smtp() {
        return Ok(());
    }
    Err(MailgateError::MissingMailingMechanism)
}

pub fn require_passwords_file(res: &mut Resolution<'_>) -> Result<()> {
    let path = Path::new(&res.raw.passwords);
    if !res.fs.exists(path) {
        return Err(MailgateError::MissingPasswordsFile(path.to_path_buf()));
    }
    Ok(())
}
