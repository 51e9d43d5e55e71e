// src/config/loader.rs

use tracing::debug;

use crate::config::model::{
    DEFAULT_EMAIL_STATUS_FILE, DEFAULT_NO_SEND_MODE, DEFAULT_PASSWORDS_FILE, DEFAULT_SMTP_PORT,
    RawConfig,
};

// Secrets and mechanism settings come in as plain environment variables.
pub const SENDGRID_API_KEY: &str = "SENDGRID_API_KEY";
pub const SERVICE_ACCOUNT_JSON: &str = "SERVICE_ACCOUNT_JSON";
pub const SMTP_SERVER: &str = "SMTP_SERVER";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USERNAME: &str = "SMTP_USERNAME";
pub const SMTP_PASSWORD: &str = "SMTP_PASSWORD";

// Action inputs, as exported by the GitHub Actions runner.
pub const INPUT_FROM_EMAIL: &str = "INPUT_FROM_EMAIL";
pub const INPUT_CSV_INPUT_FILE: &str = "INPUT_CSV_INPUT_FILE";
pub const INPUT_GOOGLE_SPREADSHEET_ID: &str = "INPUT_GOOGLE_SPREADSHEET_ID";
pub const INPUT_GOOGLE_WORKSHEET_INDEX: &str = "INPUT_GOOGLE_WORKSHEET_INDEX";
pub const INPUT_EMAIL_COLUMN: &str = "INPUT_EMAIL_COLUMN";
pub const INPUT_FILES_COLUMN: &str = "INPUT_FILES_COLUMN";
pub const INPUT_PASSWORDS: &str = "INPUT_PASSWORDS";
pub const INPUT_TEMPLATE_FILE: &str = "INPUT_TEMPLATE_FILE";
pub const INPUT_EMAIL_STATUS_FILE: &str = "INPUT_EMAIL_STATUS_FILE";
pub const INPUT_NO_SEND_MODE: &str = "INPUT_NO_SEND_MODE";

/// Keys whose values must never appear in logs.
const SECRET_KEYS: &[&str] = &[SENDGRID_API_KEY, SERVICE_ACCOUNT_JSON, SMTP_PASSWORD];

/// Read the raw configuration from the process environment.
pub fn load_from_env() -> RawConfig {
    load_with(|key| std::env::var(key).ok())
}

/// Read the raw configuration through an arbitrary key lookup.
///
/// No validation happens here. A key that is set to an empty string counts
/// as unset: the runner exports every declared action input, unset ones
/// as `""`.
pub fn load_with<F>(lookup: F) -> RawConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        let value = lookup(key).filter(|v| !v.is_empty());
        if SECRET_KEYS.iter().any(|secret| *secret == key) {
            debug!(key, set = value.is_some(), "read environment variable");
        } else {
            debug!(key, value = ?value, "read environment variable");
        }
        value
    };
    let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

    RawConfig {
        sendgrid_api_key: get(SENDGRID_API_KEY),
        service_account_json: get(SERVICE_ACCOUNT_JSON),
        smtp_server: get(SMTP_SERVER),
        smtp_port: or_default(SMTP_PORT, DEFAULT_SMTP_PORT),
        smtp_username: get(SMTP_USERNAME),
        smtp_password: get(SMTP_PASSWORD),
        from_email: get(INPUT_FROM_EMAIL),
        csv_input_file: get(INPUT_CSV_INPUT_FILE),
        google_spreadsheet_id: get(INPUT_GOOGLE_SPREADSHEET_ID),
        google_worksheet_index: get(INPUT_GOOGLE_WORKSHEET_INDEX),
        email_column: get(INPUT_EMAIL_COLUMN),
        files_column: get(INPUT_FILES_COLUMN),
        passwords: or_default(INPUT_PASSWORDS, DEFAULT_PASSWORDS_FILE),
        template_file: get(INPUT_TEMPLATE_FILE),
        email_status_file: or_default(INPUT_EMAIL_STATUS_FILE, DEFAULT_EMAIL_STATUS_FILE),
        no_send_mode: or_default(INPUT_NO_SEND_MODE, DEFAULT_NO_SEND_MODE),
    }
}
