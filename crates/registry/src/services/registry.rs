//! Client registry service.
//!
//! Validates input, drives the repository and translates every store
//! failure into a [`RegistryError`]. Handlers and the CLI both go through
//! this type, so the store handle is always injected.

use sqlx::SqlitePool;
use thiserror::Error;

use lex_core::{ClientView, PersonId};

use crate::db::{ClientRepository, RegistrationError, RepositoryError};
use crate::models::client::{
    NewOrganization, RegisterClientRequest, ValidationError, parse_person_id,
};

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Input was rejected before touching the store.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The registration transaction was rolled back.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// No person has the requested id.
    #[error("person {0} not found")]
    NotFound(PersonId),

    /// Any other store failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub person_id: PersonId,
    /// Name the registrant is greeted with.
    pub display_name: String,
}

impl Registration {
    /// Human-readable confirmation returned to the caller.
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!(
            "Client {} registered with id {}!",
            self.display_name, self.person_id
        )
    }
}

/// Client registry service.
pub struct ClientRegistry<'a> {
    clients: ClientRepository<'a>,
}

impl<'a> ClientRegistry<'a> {
    /// Create a new registry service over a store handle.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            clients: ClientRepository::new(pool),
        }
    }

    /// List all clients ordered by display name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Repository` if the store read fails; no
    /// partial listing is ever returned.
    pub async fn list_clients(&self) -> Result<Vec<ClientView>, RegistryError> {
        Ok(self.clients.list_all().await?)
    }

    /// Register a natural person as a client.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Validation` for missing or malformed fields,
    /// or `RegistryError::Registration` if the transaction was rolled back.
    pub async fn register_client(
        &self,
        request: &RegisterClientRequest,
    ) -> Result<Registration, RegistryError> {
        let new = request.validate()?;
        let person_id = self.clients.register_individual(&new).await?;

        Ok(Registration {
            person_id,
            display_name: new.first_name,
        })
    }

    /// Register a legal entity as a client.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register_client`].
    pub async fn register_organization(
        &self,
        new: &NewOrganization,
    ) -> Result<Registration, RegistryError> {
        let person_id = self.clients.register_organization(new).await?;

        Ok(Registration {
            person_id,
            display_name: new.legal_name.clone(),
        })
    }

    /// Delete the person behind a client, identified by raw text.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Validation` if `raw_person_id` is not a
    /// positive integer, `RegistryError::NotFound` if no row was deleted, or
    /// `RegistryError::Repository` if the delete fails.
    pub async fn delete_client(&self, raw_person_id: &str) -> Result<PersonId, RegistryError> {
        let person_id = parse_person_id(raw_person_id)?;

        if self.clients.delete(person_id).await? {
            tracing::info!(%person_id, "Deleted client");
            Ok(person_id)
        } else {
            Err(RegistryError::NotFound(person_id))
        }
    }
}
