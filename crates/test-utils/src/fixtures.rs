use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::builders::RawConfigBuilder;

pub const RECIPIENTS_CSV: &str = "name,email,files\nAda,ada@example.com,ada.pdf\nAlan,alan@example.com,alan.pdf\n";

/// A scratch directory holding the files a mailing run reads.
pub struct MailingWorkspace {
    dir: TempDir,
}

impl MailingWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Absolute path of `name` inside the workspace (whether or not it exists).
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> anyhow::Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Workspace with a recipients CSV and a passwords file, and a builder
    /// pointing at both with a SendGrid key set.
    pub fn valid() -> anyhow::Result<(Self, RawConfigBuilder)> {
        let ws = Self::new()?;
        let csv = ws.write("recipients.csv", RECIPIENTS_CSV)?;
        let passwords = ws.write("passwords.json", r#"{"ada.pdf":"pw1"}"#)?;
        let builder = RawConfigBuilder::with_required()
            .csv(csv)
            .passwords(passwords)
            .sendgrid("SG.test-key");
        Ok((ws, builder))
    }
}
