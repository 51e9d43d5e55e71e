// src/config/mod.rs

//! Loading and validation of the mailing configuration.
//!
//! Responsibilities:
//! - Define the raw and resolved data model (`model.rs`).
//! - Read raw values from the environment (`loader.rs`).
//! - Apply the ordered validation rules (`validate.rs`), including
//!   credential resolution (`credential.rs`) and CSV checks (`csv_check.rs`).

pub mod credential;
pub mod csv_check;
pub mod loader;
pub mod model;
pub mod validate;

pub use credential::{CredentialInput, resolve_credential};
pub use loader::{load_from_env, load_with};
pub use model::{RawConfig, RequiredField, ResolvedConfig, ResolvedCredential};
pub use validate::{RULES, Resolution, validate};
