//! Core types for the Lex registry.
//!
//! This module provides type-safe wrappers for the registry's domain concepts.

pub mod client;
pub mod email;
pub mod id;
pub mod party;
pub mod tax_id;

pub use client::ClientView;
pub use email::{Email, EmailError};
pub use id::*;
pub use party::{Individual, Organization, Party};
pub use tax_id::{TaxId, TaxIdError};
