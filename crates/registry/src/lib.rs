//! Lex Registry library.
//!
//! This crate provides the client registry service as a library, allowing
//! it to be tested and driven from the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
