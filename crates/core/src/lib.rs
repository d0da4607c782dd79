//! Lex Core - Shared domain types for the client registry.
//!
//! This crate provides the types used by every Lex component:
//! - `registry` - HTTP service and data-access layer
//! - `cli` - Command-line tools for migrations and registry management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Database encoding is available behind the
//! `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, validated emails and tax ids, the [`Party`]
//!   specialization union and the [`ClientView`] read model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
