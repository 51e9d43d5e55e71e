// src/exec/invocation.rs

use std::fmt;

use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::config::loader::SERVICE_ACCOUNT_JSON;

/// Mailer executable used when `--mailer` is not given.
pub const DEFAULT_MAILER: &str = "integrimark";
pub const MAIL_SUBCOMMAND: &str = "mail";

/// Flags whose value is replaced by [`REDACTED`] in logs and dry-run output.
const SECRET_FLAGS: &[&str] = &["--sendgrid-api-key", "--smtp-password"];
const REDACTED: &str = "***";

/// A fully built mailer command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    /// Subcommand followed by flags, in the order the mailer expects.
    pub args: Vec<String>,
    /// Extra environment for the child process.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Map a validated configuration to the mailer's argument list.
    ///
    /// Absent optional values are left out entirely. `--smtp-port` rides
    /// along with `--smtp-server`, since the port always has a value.
    pub fn build(resolved: &ResolvedConfig, program: &str) -> Self {
        let cfg = resolved.config();
        let mut args = vec![MAIL_SUBCOMMAND.to_string()];

        let mut push = |flag: &str, value: Option<&str>| {
            if let Some(value) = value {
                args.push(flag.to_string());
                args.push(value.to_string());
            }
        };

        push("--sendgrid-api-key", cfg.sendgrid_api_key.as_deref());
        push("--smtp-server", cfg.smtp_server.as_deref());
        push(
            "--smtp-port",
            cfg.smtp_server.as_ref().map(|_| cfg.smtp_port.as_str()),
        );
        push("--smtp-username", cfg.smtp_username.as_deref());
        push("--smtp-password", cfg.smtp_password.as_deref());
        push("--from-email", cfg.from_email.as_deref());
        push("--csv-input-file", cfg.csv_input_file.as_deref());
        push("--google-spreadsheet-id", cfg.google_spreadsheet_id.as_deref());
        push("--google-worksheet-index", cfg.google_worksheet_index.as_deref());
        push("--email-column", cfg.email_column.as_deref());
        push("--files-column", cfg.files_column.as_deref());
        push("--passwords", Some(cfg.passwords.as_str()));
        push("--template-file", cfg.template_file.as_deref());
        push("--email-status-file", Some(cfg.email_status_file.as_str()));

        if cfg.no_send() {
            args.push("--no-send-mode".to_string());
        }

        let env = resolved
            .credential_path()
            .map(|path| {
                vec![(
                    SERVICE_ACCOUNT_JSON.to_string(),
                    path.to_string_lossy().into_owned(),
                )]
            })
            .unwrap_or_default();

        Self {
            program: program.to_string(),
            args,
            env,
        }
    }

    /// Program name followed by every argument.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Copy of this invocation with secret flag values masked.
    pub fn redacted(&self) -> Invocation {
        let mut args = self.args.clone();
        for i in 1..args.len() {
            if SECRET_FLAGS.contains(&args[i - 1].as_str()) {
                args[i] = REDACTED.to_string();
            }
        }
        Invocation {
            program: self.program.clone(),
            args,
            env: self.env.clone(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}
