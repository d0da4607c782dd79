//! The unified client read model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::id::{ClientId, PersonId};
use super::party::Party;

/// One row of the client listing.
///
/// `full_name` and `document` are projected from the person's [`Party`];
/// both are `None` for a person that has no specialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub client_id: ClientId,
    pub person_id: PersonId,
    pub email: String,
    pub full_name: Option<String>,
    pub document: Option<String>,
}

impl ClientView {
    /// Build a view from a client row and its (optional) specialization.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        person_id: PersonId,
        email: String,
        party: Option<&Party>,
    ) -> Self {
        Self {
            client_id,
            person_id,
            email,
            full_name: party.map(Party::full_name),
            document: party.and_then(Party::document).map(str::to_owned),
        }
    }

    /// Listing order: by name with byte-wise comparison (SQLite's default
    /// `BINARY` collation), unnamed rows first, ties broken by client id.
    #[must_use]
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.full_name
            .cmp(&other.full_name)
            .then(self.client_id.cmp(&other.client_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::party::{Individual, Organization};

    fn view(id: i64, party: Option<&Party>) -> ClientView {
        ClientView::new(
            ClientId::new(id),
            PersonId::new(id),
            format!("p{id}@x.com"),
            party,
        )
    }

    #[test]
    fn test_view_projects_party() {
        let party = Party::Individual(Individual {
            first_name: "Ana".to_owned(),
            last_name: Some("Silva".to_owned()),
            tax_id: "11122233344".to_owned(),
        });
        let v = view(1, Some(&party));
        assert_eq!(v.full_name.as_deref(), Some("Ana Silva"));
        assert_eq!(v.document.as_deref(), Some("11122233344"));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let v = view(3, None);
        let json = serde_json::to_value(&v).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "clientId": 3,
                "personId": 3,
                "email": "p3@x.com",
                "fullName": null,
                "document": null,
            })
        );
    }

    #[test]
    fn test_display_order_is_case_sensitive() {
        let org = Party::Organization(Organization {
            legal_name: "acme".to_owned(),
            tax_id: None,
        });
        let bruno = Party::Individual(Individual {
            first_name: "Bruno".to_owned(),
            last_name: None,
            tax_id: "2".to_owned(),
        });
        let zed = Party::Individual(Individual {
            first_name: "Zed".to_owned(),
            last_name: None,
            tax_id: "3".to_owned(),
        });

        let mut views = vec![
            view(1, Some(&org)),
            view(2, Some(&zed)),
            view(3, None),
            view(4, Some(&bruno)),
        ];
        views.sort_by(ClientView::display_order);

        let names: Vec<_> = views.iter().map(|v| v.full_name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("Bruno"), Some("Zed"), Some("acme")]);
    }
}
