//! Request and write-side domain types.
//!
//! The read model (`ClientView`) lives in `lex-core`; these types describe
//! what the service accepts and what it hands to the repository.

pub mod client;
