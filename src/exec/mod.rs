// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`invocation`] maps a validated configuration to the mailer's command
//!   line.
//! - [`runner`] spawns that command once with `tokio::process::Command` and
//!   classifies the result.

pub mod invocation;
pub mod runner;

pub use invocation::{DEFAULT_MAILER, Invocation};
pub use runner::{Outcome, run_invocation};
