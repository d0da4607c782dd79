//! Client repository for database operations.
//!
//! Reads join `client -> person -> (individual | organization)` and project
//! each row through [`Party`]. Writes create a person, its specialization and
//! its client role inside one transaction.

use std::fmt;

use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

use lex_core::{ClientView, Email, Individual, Organization, Party, PersonId};

use super::RepositoryError;
use crate::models::client::{NewIndividual, NewOrganization};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Flat row from the client listing join.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    client_id: lex_core::ClientId,
    person_id: PersonId,
    email: Email,
    individual_person_id: Option<PersonId>,
    first_name: Option<String>,
    last_name: Option<String>,
    individual_tax_id: Option<String>,
    organization_person_id: Option<PersonId>,
    legal_name: Option<String>,
    organization_tax_id: Option<String>,
}

impl ClientRow {
    fn party(&mut self) -> Result<Option<Party>, RepositoryError> {
        match (self.individual_person_id, self.organization_person_id) {
            (None, None) => Ok(None),
            (Some(_), None) => {
                let (Some(first_name), Some(tax_id)) =
                    (self.first_name.take(), self.individual_tax_id.take())
                else {
                    return Err(RepositoryError::DataCorruption(format!(
                        "individual {} is missing required columns",
                        self.person_id
                    )));
                };
                Ok(Some(Party::Individual(Individual {
                    first_name,
                    last_name: self.last_name.take(),
                    tax_id,
                })))
            }
            (None, Some(_)) => {
                let Some(legal_name) = self.legal_name.take() else {
                    return Err(RepositoryError::DataCorruption(format!(
                        "organization {} has no legal name",
                        self.person_id
                    )));
                };
                Ok(Some(Party::Organization(Organization {
                    legal_name,
                    tax_id: self.organization_tax_id.take(),
                })))
            }
            (Some(_), Some(_)) => Err(RepositoryError::DataCorruption(format!(
                "person {} is both an individual and an organization",
                self.person_id
            ))),
        }
    }
}

impl TryFrom<ClientRow> for ClientView {
    type Error = RepositoryError;

    fn try_from(mut row: ClientRow) -> Result<Self, Self::Error> {
        let party = row.party()?;
        Ok(Self::new(
            row.client_id,
            row.person_id,
            row.email.into_inner(),
            party.as_ref(),
        ))
    }
}

// =============================================================================
// Registration Errors
// =============================================================================

/// Insert step of a registration transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Person,
    Individual,
    Organization,
    Client,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Person => "person",
            Self::Individual => "individual",
            Self::Organization => "organization",
            Self::Client => "client",
        })
    }
}

/// A registration transaction that was rolled back.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// One of the dependent inserts failed.
    #[error("failed to insert {stage} record: {source}")]
    Insert {
        stage: RegistrationStage,
        #[source]
        source: RepositoryError,
    },

    /// Opening or committing the transaction failed.
    #[error("registration transaction failed: {0}")]
    Transaction(#[source] RepositoryError),
}

impl RegistrationError {
    const fn insert(stage: RegistrationStage, source: RepositoryError) -> Self {
        Self::Insert { stage, source }
    }

    /// The insert step that failed, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<RegistrationStage> {
        match self {
            Self::Insert { stage, .. } => Some(*stage),
            Self::Transaction(_) => None,
        }
    }

    /// Whether the failure was a uniqueness violation (duplicate email or tax id).
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Insert {
                source: RepositoryError::Conflict(_),
                ..
            }
        )
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every client, ordered for display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a person's specialization rows are inconsistent.
    pub async fn list_all(&self) -> Result<Vec<ClientView>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r"
            SELECT client.client_id AS client_id,
                   person.person_id AS person_id,
                   person.email AS email,
                   individual.person_id AS individual_person_id,
                   individual.first_name AS first_name,
                   individual.last_name AS last_name,
                   individual.tax_id AS individual_tax_id,
                   organization.person_id AS organization_person_id,
                   organization.legal_name AS legal_name,
                   organization.tax_id AS organization_tax_id
            FROM client
            JOIN person ON client.person_id = person.person_id
            LEFT JOIN individual ON person.person_id = individual.person_id
            LEFT JOIN organization ON person.person_id = organization.person_id
            ORDER BY client.client_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut clients = rows
            .into_iter()
            .map(ClientView::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        clients.sort_by(ClientView::display_order);

        Ok(clients)
    }

    /// Register a natural person as a client.
    ///
    /// Inserts `person`, `individual` and `client` in one transaction; any
    /// failure rolls back all three.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::Insert` naming the failed stage (a
    /// `RepositoryError::Conflict` source for duplicate email or tax id).
    /// Returns `RegistrationError::Transaction` if the transaction cannot be opened or committed.
    pub async fn register_individual(
        &self,
        new: &NewIndividual,
    ) -> Result<PersonId, RegistrationError> {
        let mut tx = self.begin().await?;
        let person_id = insert_person(&mut tx, &new.email).await?;

        sqlx::query(
            r"
            INSERT INTO individual (person_id, tax_id, first_name, last_name)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(person_id)
        .bind(new.tax_id.as_str())
        .bind(&new.first_name)
        .bind(new.last_name.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            RegistrationError::insert(
                RegistrationStage::Individual,
                RepositoryError::from_insert(e, "tax id"),
            )
        })?;

        insert_client(&mut tx, person_id).await?;
        commit(tx).await?;

        tracing::info!(%person_id, "Registered individual client");
        Ok(person_id)
    }

    /// Register a legal entity as a client.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register_individual`], with the
    /// `RegistrationStage::Organization` stage in place of `Individual`.
    pub async fn register_organization(
        &self,
        new: &NewOrganization,
    ) -> Result<PersonId, RegistrationError> {
        let mut tx = self.begin().await?;
        let person_id = insert_person(&mut tx, &new.email).await?;

        sqlx::query(
            r"
            INSERT INTO organization (person_id, tax_id, legal_name)
            VALUES (?, ?, ?)
            ",
        )
        .bind(person_id)
        .bind(new.tax_id.as_ref().map(lex_core::TaxId::as_str))
        .bind(&new.legal_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            RegistrationError::insert(
                RegistrationStage::Organization,
                RepositoryError::from_insert(e, "tax id"),
            )
        })?;

        insert_client(&mut tx, person_id).await?;
        commit(tx).await?;

        tracing::info!(%person_id, "Registered organization client");
        Ok(person_id)
    }

    /// Delete a person; the store cascades to its specialization and client role.
    ///
    /// Returns `false` if no person has this id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, person_id: PersonId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM person WHERE person_id = ?")
            .bind(person_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, RegistrationError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RegistrationError::Transaction(e.into()))
    }
}

async fn insert_person(
    tx: &mut Transaction<'static, Sqlite>,
    email: &Email,
) -> Result<PersonId, RegistrationError> {
    sqlx::query_scalar::<_, PersonId>(
        "INSERT INTO person (email) VALUES (?) RETURNING person_id",
    )
    .bind(email)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        RegistrationError::insert(
            RegistrationStage::Person,
            RepositoryError::from_insert(e, "email"),
        )
    })
}

async fn insert_client(
    tx: &mut Transaction<'static, Sqlite>,
    person_id: PersonId,
) -> Result<(), RegistrationError> {
    sqlx::query("INSERT INTO client (person_id) VALUES (?)")
        .bind(person_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            RegistrationError::insert(
                RegistrationStage::Client,
                RepositoryError::from_insert(e, "client role"),
            )
        })?;
    Ok(())
}

async fn commit(tx: Transaction<'static, Sqlite>) -> Result<(), RegistrationError> {
    tx.commit()
        .await
        .map_err(|e| RegistrationError::Transaction(e.into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lex_core::TaxId;

    use super::*;
    use crate::db::create_memory_pool;

    fn ana() -> NewIndividual {
        NewIndividual {
            first_name: "Ana".to_owned(),
            last_name: Some("Silva".to_owned()),
            tax_id: TaxId::parse("11122233344").unwrap(),
            email: Email::parse("ana@x.com").unwrap(),
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_and_list_individual() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);

        let person_id = repo.register_individual(&ana()).await.unwrap();
        assert_eq!(person_id, PersonId::new(1));

        let clients = repo.list_all().await.unwrap();
        assert_eq!(clients.len(), 1);
        let client = clients.first().unwrap();
        assert_eq!(client.client_id, lex_core::ClientId::new(1));
        assert_eq!(client.person_id, person_id);
        assert_eq!(client.email, "ana@x.com");
        assert_eq!(client.full_name.as_deref(), Some("Ana Silva"));
        assert_eq!(client.document.as_deref(), Some("11122233344"));
    }

    #[tokio::test]
    async fn test_duplicate_email_fails_at_person_stage() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);
        repo.register_individual(&ana()).await.unwrap();

        let mut second = ana();
        second.tax_id = TaxId::parse("99988877766").unwrap();
        let err = repo.register_individual(&second).await.unwrap_err();

        assert_eq!(err.stage(), Some(RegistrationStage::Person));
        assert!(err.is_conflict());
        assert_eq!(count(&pool, "person").await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_rolls_back_person() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);
        repo.register_individual(&ana()).await.unwrap();

        let mut second = ana();
        second.email = Email::parse("outra@x.com").unwrap();
        let err = repo.register_individual(&second).await.unwrap_err();

        assert_eq!(err.stage(), Some(RegistrationStage::Individual));
        assert!(err.is_conflict());
        // The person inserted before the failing step must not survive
        assert_eq!(count(&pool, "person").await, 1);
        assert_eq!(count(&pool, "client").await, 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_dependents() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);
        let person_id = repo.register_individual(&ana()).await.unwrap();

        assert!(repo.delete(person_id).await.unwrap());
        assert_eq!(count(&pool, "person").await, 0);
        assert_eq!(count(&pool, "individual").await, 0);
        assert_eq!(count(&pool, "client").await, 0);

        assert!(!repo.delete(person_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_organization_cascades_to_dependents() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);
        let person_id = repo
            .register_organization(&NewOrganization {
                legal_name: "Zeta Consultoria Ltda".to_owned(),
                tax_id: Some(TaxId::parse("12.345.678/0001-90").unwrap()),
                email: Email::parse("contato@zeta.com").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(count(&pool, "organization").await, 1);

        assert!(repo.delete(person_id).await.unwrap());
        assert_eq!(count(&pool, "person").await, 0);
        assert_eq!(count(&pool, "organization").await, 0);
        assert_eq!(count(&pool, "client").await, 0);
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_mixes_individuals_and_organizations() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);

        repo.register_organization(&NewOrganization {
            legal_name: "Zeta Consultoria Ltda".to_owned(),
            tax_id: Some(TaxId::parse("12.345.678/0001-90").unwrap()),
            email: Email::parse("contato@zeta.com").unwrap(),
        })
        .await
        .unwrap();
        repo.register_individual(&ana()).await.unwrap();

        let clients = repo.list_all().await.unwrap();
        let names: Vec<_> = clients.iter().map(|c| c.full_name.as_deref()).collect();
        assert_eq!(names, vec![Some("Ana Silva"), Some("Zeta Consultoria Ltda")]);
        assert_eq!(
            clients.get(1).unwrap().document.as_deref(),
            Some("12.345.678/0001-90")
        );
    }

    #[tokio::test]
    async fn test_person_without_specialization_is_listed_unnamed() {
        let pool = create_memory_pool().await.unwrap();
        repo_insert_bare_client(&pool, "bare@x.com").await;
        let repo = ClientRepository::new(&pool);
        repo.register_individual(&ana()).await.unwrap();

        let clients = repo.list_all().await.unwrap();
        assert_eq!(clients.len(), 2);
        let first = clients.first().unwrap();
        assert_eq!(first.email, "bare@x.com");
        assert_eq!(first.full_name, None);
        assert_eq!(first.document, None);
    }

    #[tokio::test]
    async fn test_store_rejects_second_specialization() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ClientRepository::new(&pool);
        let person_id = repo.register_individual(&ana()).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO organization (person_id, tax_id, legal_name) VALUES (?, ?, ?)",
        )
        .bind(person_id)
        .bind("00.000.000/0001-00")
        .bind("Ana Silva ME")
        .execute(&pool)
        .await;

        assert!(result.is_err());
        assert_eq!(count(&pool, "organization").await, 0);
    }

    async fn repo_insert_bare_client(pool: &SqlitePool, email: &str) {
        let person_id: i64 =
            sqlx::query_scalar("INSERT INTO person (email) VALUES (?) RETURNING person_id")
                .bind(email)
                .fetch_one(pool)
                .await
                .unwrap();
        sqlx::query("INSERT INTO client (person_id) VALUES (?)")
            .bind(person_id)
            .execute(pool)
            .await
            .unwrap();
    }
}
