//! Person specializations.
//!
//! A person is either a natural person ([`Individual`]) or a legal entity
//! ([`Organization`]), never both. Every read path goes through [`Party`] so
//! the display rules live in exactly one place.

/// Natural person ("pessoa física").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub first_name: String,
    pub last_name: Option<String>,
    /// CPF-equivalent document.
    pub tax_id: String,
}

/// Legal entity ("pessoa jurídica").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub legal_name: String,
    /// CNPJ-equivalent document. Nullable in the store.
    pub tax_id: Option<String>,
}

/// The specialization attached to a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Party {
    Individual(Individual),
    Organization(Organization),
}

impl Party {
    /// Name shown for the person.
    ///
    /// Individuals render as `"first last"`, or just the first name when the
    /// last name is missing or blank. Organizations render their legal name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            Self::Individual(individual) => match individual
                .last_name
                .as_deref()
                .map(str::trim)
                .filter(|last| !last.is_empty())
            {
                Some(last) => format!("{} {last}", individual.first_name),
                None => individual.first_name.clone(),
            },
            Self::Organization(organization) => organization.legal_name.clone(),
        }
    }

    /// Tax document shown for the person.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::Individual(individual) => Some(&individual.tax_id),
            Self::Organization(organization) => organization.tax_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana(last_name: Option<&str>) -> Party {
        Party::Individual(Individual {
            first_name: "Ana".to_owned(),
            last_name: last_name.map(str::to_owned),
            tax_id: "11122233344".to_owned(),
        })
    }

    #[test]
    fn test_individual_projection() {
        let party = ana(Some("Silva"));
        assert_eq!(party.full_name(), "Ana Silva");
        assert_eq!(party.document(), Some("11122233344"));
    }

    #[test]
    fn test_individual_without_last_name() {
        assert_eq!(ana(None).full_name(), "Ana");
        assert_eq!(ana(Some("  ")).full_name(), "Ana");
    }

    #[test]
    fn test_organization_projection() {
        let party = Party::Organization(Organization {
            legal_name: "Lex Advocacia Ltda".to_owned(),
            tax_id: Some("12.345.678/0001-90".to_owned()),
        });
        assert_eq!(party.full_name(), "Lex Advocacia Ltda");
        assert_eq!(party.document(), Some("12.345.678/0001-90"));

        let untaxed = Party::Organization(Organization {
            legal_name: "Associação".to_owned(),
            tax_id: None,
        });
        assert_eq!(untaxed.document(), None);
    }
}
