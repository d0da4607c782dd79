//! Client registration inputs.

use serde::Deserialize;
use thiserror::Error;

use lex_core::{Email, EmailError, IdParseError, PersonId, TaxId, TaxIdError};

/// Errors raised before the store is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank.
    #[error("{}", missing_fields_message(.0))]
    MissingFields(Vec<&'static str>),

    /// The email has no usable `local@domain` shape.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// The tax id is unusable.
    #[error("invalid tax id: {0}")]
    TaxId(#[from] TaxIdError),

    /// The person identifier is not a positive integer.
    #[error("invalid person id: {0}")]
    PersonId(#[from] IdParseError),
}

/// JSON body of `POST /clients`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
}

/// A validated natural-person registration.
#[derive(Debug, Clone)]
pub struct NewIndividual {
    pub first_name: String,
    pub last_name: Option<String>,
    pub tax_id: TaxId,
    pub email: Email,
}

/// A validated legal-entity registration.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub legal_name: String,
    pub tax_id: Option<TaxId>,
    pub email: Email,
}

impl RegisterClientRequest {
    /// Check required fields and normalize the request.
    ///
    /// All missing fields are reported together.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if `firstName`, `taxId` or
    /// `email` is absent or blank, or a parse error for a malformed value.
    pub fn validate(&self) -> Result<NewIndividual, ValidationError> {
        let first_name = non_blank(self.first_name.as_deref());
        let tax_id = non_blank(self.tax_id.as_deref());
        let email = non_blank(self.email.as_deref());

        let (Some(first_name), Some(tax_id), Some(email)) = (first_name, tax_id, email) else {
            let missing = [
                ("firstName", first_name.is_none()),
                ("taxId", tax_id.is_none()),
                ("email", email.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect();
            return Err(ValidationError::MissingFields(missing));
        };

        Ok(NewIndividual {
            first_name: first_name.to_owned(),
            last_name: non_blank(self.last_name.as_deref()).map(str::to_owned),
            tax_id: TaxId::parse(tax_id)?,
            email: Email::parse(email)?,
        })
    }
}

impl NewOrganization {
    /// Validate a legal-entity registration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if the legal name or email is
    /// blank, or a parse error for a malformed value.
    pub fn parse(
        legal_name: &str,
        tax_id: Option<&str>,
        email: &str,
    ) -> Result<Self, ValidationError> {
        let legal_name = non_blank(Some(legal_name));
        let email = non_blank(Some(email));
        let (Some(legal_name), Some(email)) = (legal_name, email) else {
            let mut missing = Vec::new();
            if legal_name.is_none() {
                missing.push("legalName");
            }
            if email.is_none() {
                missing.push("email");
            }
            return Err(ValidationError::MissingFields(missing));
        };

        Ok(Self {
            legal_name: legal_name.to_owned(),
            tax_id: non_blank(tax_id).map(TaxId::parse).transpose()?,
            email: Email::parse(email)?,
        })
    }
}

/// Parse a person identifier received as text.
///
/// # Errors
///
/// Returns `ValidationError::PersonId` if the text is not a positive integer.
pub fn parse_person_id(raw: &str) -> Result<PersonId, ValidationError> {
    Ok(PersonId::parse(raw)?)
}

fn missing_fields_message(fields: &[&str]) -> String {
    let verb = if fields.len() == 1 { "is" } else { "are" };
    format!("{} {verb} required", fields.join(", "))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(
        first: Option<&str>,
        last: Option<&str>,
        tax: Option<&str>,
        email: Option<&str>,
    ) -> RegisterClientRequest {
        RegisterClientRequest {
            first_name: first.map(str::to_owned),
            last_name: last.map(str::to_owned),
            tax_id: tax.map(str::to_owned),
            email: email.map(str::to_owned),
        }
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let new = request(Some(" Ana "), Some(""), Some("11122233344"), Some("ana@x.com"))
            .validate()
            .unwrap();
        assert_eq!(new.first_name, "Ana");
        assert_eq!(new.last_name, None);
        assert_eq!(new.tax_id.as_str(), "11122233344");
        assert_eq!(new.email.as_str(), "ana@x.com");
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let err = request(Some("  "), None, None, Some("ana@x.com"))
            .validate()
            .unwrap_err();
        assert!(matches!(&err, ValidationError::MissingFields(f) if f == &["firstName", "taxId"]));
        assert_eq!(err.to_string(), "firstName, taxId are required");

        let err = request(Some("Ana"), None, Some("1"), None).validate().unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let err = request(Some("Ana"), None, Some("1"), Some("ana.x.com"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::Email(EmailError::MissingAtSymbol)));
    }

    #[test]
    fn test_request_accepts_camel_case_json() {
        let req: RegisterClientRequest = serde_json::from_str(
            r#"{"firstName":"Ana","taxId":"11122233344","email":"ana@x.com"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Ana"));
        assert!(req.last_name.is_none());
    }

    #[test]
    fn test_new_organization_optional_tax_id() {
        let org = NewOrganization::parse("Lex Ltda", Some(" "), "lex@x.com").unwrap();
        assert!(org.tax_id.is_none());

        let err = NewOrganization::parse("", None, "").unwrap_err();
        assert!(matches!(err, ValidationError::MissingFields(f) if f == ["legalName", "email"]));
    }

    #[test]
    fn test_parse_person_id() {
        assert_eq!(parse_person_id("12").unwrap(), PersonId::new(12));
        assert!(matches!(parse_person_id("abc"), Err(ValidationError::PersonId(_))));
    }
}
