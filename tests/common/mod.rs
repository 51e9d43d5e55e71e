#![allow(dead_code)]

use clap::Parser;
use mailgate::cli::CliArgs;

pub use mailgate_test_utils::builders::RawConfigBuilder;
pub use mailgate_test_utils::fixtures::MailingWorkspace;
pub use mailgate_test_utils::init_tracing;

/// CLI args as if the binary was called with `extra`.
pub fn cli_args(extra: &[&str]) -> CliArgs {
    let argv = std::iter::once("mailgate").chain(extra.iter().copied());
    CliArgs::try_parse_from(argv).expect("valid test CLI args")
}
