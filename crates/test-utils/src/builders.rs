#![allow(dead_code)]

use std::path::Path;

use mailgate::config::RawConfig;

/// Builder for `RawConfig` to simplify test setup.
///
/// Starts from the loader defaults with nothing else set.
pub struct RawConfigBuilder {
    config: RawConfig,
}

impl RawConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfig::default(),
        }
    }

    /// `from-email` and `email-column` set, nothing else.
    pub fn with_required() -> Self {
        Self::new()
            .from_email("course@example.com")
            .email_column("email")
    }

    pub fn from_email(mut self, v: &str) -> Self {
        self.config.from_email = Some(v.to_string());
        self
    }

    pub fn email_column(mut self, v: &str) -> Self {
        self.config.email_column = Some(v.to_string());
        self
    }

    pub fn files_column(mut self, v: &str) -> Self {
        self.config.files_column = Some(v.to_string());
        self
    }

    pub fn sendgrid(mut self, key: &str) -> Self {
        self.config.sendgrid_api_key = Some(key.to_string());
        self
    }

    pub fn smtp_server(mut self, v: &str) -> Self {
        self.config.smtp_server = Some(v.to_string());
        self
    }

    pub fn smtp_port(mut self, v: &str) -> Self {
        self.config.smtp_port = v.to_string();
        self
    }

    pub fn smtp_username(mut self, v: &str) -> Self {
        self.config.smtp_username = Some(v.to_string());
        self
    }

    pub fn smtp_password(mut self, v: &str) -> Self {
        self.config.smtp_password = Some(v.to_string());
        self
    }

    pub fn csv(mut self, path: impl AsRef<Path>) -> Self {
        self.config.csv_input_file = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn spreadsheet(mut self, id: &str) -> Self {
        self.config.google_spreadsheet_id = Some(id.to_string());
        self
    }

    pub fn worksheet_index(mut self, v: &str) -> Self {
        self.config.google_worksheet_index = Some(v.to_string());
        self
    }

    pub fn service_account(mut self, v: impl AsRef<str>) -> Self {
        self.config.service_account_json = Some(v.as_ref().to_string());
        self
    }

    pub fn passwords(mut self, path: impl AsRef<Path>) -> Self {
        self.config.passwords = path.as_ref().to_string_lossy().into_owned();
        self
    }

    pub fn template(mut self, v: &str) -> Self {
        self.config.template_file = Some(v.to_string());
        self
    }

    pub fn email_status_file(mut self, v: &str) -> Self {
        self.config.email_status_file = v.to_string();
        self
    }

    pub fn no_send_mode(mut self, v: &str) -> Self {
        self.config.no_send_mode = v.to_string();
        self
    }

    pub fn build(self) -> RawConfig {
        self.config
    }
}

impl Default for RawConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
