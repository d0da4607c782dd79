//! Business logic services.
//!
//! # Services
//!
//! - `registry` - List, register and delete clients

pub mod registry;

pub use registry::{ClientRegistry, Registration, RegistryError};
