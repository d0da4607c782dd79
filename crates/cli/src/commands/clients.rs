//! Client management commands.
//!
//! These go through the same `ClientRegistry` service as the HTTP API, so
//! validation and transactional behaviour are identical.

use lex_core::ClientView;
use lex_registry::models::client::{NewOrganization, RegisterClientRequest};
use lex_registry::services::ClientRegistry;

use super::{CommandError, connect};

/// Print every client, as a table or as JSON.
pub async fn list(json: bool) -> Result<(), CommandError> {
    let pool = connect().await?;
    let clients = ClientRegistry::new(&pool).list_clients().await?;

    #[allow(clippy::print_stdout)]
    if json {
        println!("{}", serde_json::to_string_pretty(&clients)?);
    } else {
        println!("{}", render_table(&clients));
    }
    Ok(())
}

/// Register a natural person.
pub async fn add_individual(
    first_name: String,
    last_name: Option<String>,
    tax_id: String,
    email: String,
) -> Result<(), CommandError> {
    let pool = connect().await?;
    let request = RegisterClientRequest {
        first_name: Some(first_name),
        last_name,
        tax_id: Some(tax_id),
        email: Some(email),
    };

    let registration = ClientRegistry::new(&pool).register_client(&request).await?;
    tracing::info!("{}", registration.confirmation());
    Ok(())
}

/// Register a legal entity.
pub async fn add_organization(
    legal_name: &str,
    tax_id: Option<&str>,
    email: &str,
) -> Result<(), CommandError> {
    let new = NewOrganization::parse(legal_name, tax_id, email)
        .map_err(lex_registry::services::RegistryError::from)?;

    let pool = connect().await?;
    let registration = ClientRegistry::new(&pool)
        .register_organization(&new)
        .await?;
    tracing::info!("{}", registration.confirmation());
    Ok(())
}

/// Delete a client by person id.
pub async fn remove(person_id: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let person_id = ClientRegistry::new(&pool).delete_client(person_id).await?;
    tracing::info!("Client (person id {person_id}) was deleted.");
    Ok(())
}

fn render_table(clients: &[ClientView]) -> String {
    let mut out = format!(
        "{:>6}  {:>6}  {:<32}  {:<28}  {}\n",
        "CLIENT", "PERSON", "NAME", "EMAIL", "DOCUMENT"
    );
    for client in clients {
        out.push_str(&format!(
            "{:>6}  {:>6}  {:<32}  {:<28}  {}\n",
            client.client_id.as_i64(),
            client.person_id.as_i64(),
            client.full_name.as_deref().unwrap_or("-"),
            client.email,
            client.document.as_deref().unwrap_or("-"),
        ));
    }
    out.push_str(&format!("Total clients: {}", clients.len()));
    out
}
