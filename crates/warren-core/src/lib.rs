//! Core types for the Warren training environments.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the action vocabulary shared by every simulator ([`Action`]), the
//! per-environment legal-action tables ([`ActionPool`]), and the shared
//! error types ([`ConfigError`], [`ActionError`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;

pub use action::{Action, ActionPool};
pub use error::{ActionError, ConfigError};
