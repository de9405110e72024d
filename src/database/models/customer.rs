use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::user::UserId;
use crate::validation::FieldErrors;

pub type CustomerId = i64;

pub const MAX_FIELD_LENGTH: usize = 255;

const NAME_ERROR: &str = "Name is required and must be a string with a maximum of 255 characters.";
const EMAIL_ERROR: &str = "Email is required and must be a string with a maximum of 255 characters.";

/// Customer contact owned by exactly one user. The owner never leaves the
/// server, so it is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub owner_id: UserId,
}

/// Raw request body for create/update. Fields are untyped so that wrong JSON
/// types surface as field errors rather than deserialization failures.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

impl CustomerPayload {
    /// Only a JSON object carries fields; any other shape reads as an empty
    /// payload so both fields are reported missing.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => serde_json::from_value(Value::Object(map)).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Validated name/email pair. Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInput {
    name: String,
    email: String,
}

impl CustomerInput {
    pub fn new(name: &str, email: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        if !within_limits(name) {
            errors.insert("name".to_string(), NAME_ERROR.to_string());
        }

        if !within_limits(email) {
            errors.insert("email".to_string(), EMAIL_ERROR.to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        })
    }

    pub fn from_payload(payload: &CustomerPayload) -> Result<Self, FieldErrors> {
        let name = payload.name.as_ref().and_then(Value::as_str);
        let email = payload.email.as_ref().and_then(Value::as_str);

        match (name, email) {
            (Some(name), Some(email)) => Self::new(name, email),
            _ => {
                // Still report every failing field, not just the first.
                let mut errors = FieldErrors::new();
                if let Err(e) = Self::new(name.unwrap_or_default(), email.unwrap_or_default()) {
                    errors.extend(e);
                }
                Err(errors)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

fn within_limits(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_FIELD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> CustomerPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_valid_input() {
        let input = CustomerInput::from_payload(&payload(json!({"name": " Bob ", "email": "b@x.com"}))).unwrap();
        assert_eq!(input.name(), "Bob");
        assert_eq!(input.email(), "b@x.com");
    }

    #[test]
    fn reports_missing_and_mistyped_fields() {
        let errors = CustomerInput::from_payload(&payload(json!({"name": 42}))).unwrap_err();
        assert_eq!(errors.get("name").map(String::as_str), Some(NAME_ERROR));
        assert_eq!(errors.get("email").map(String::as_str), Some(EMAIL_ERROR));
    }

    #[test]
    fn rejects_blank_and_overlong_values() {
        let long_name = "n".repeat(MAX_FIELD_LENGTH + 1);
        let errors = CustomerInput::new(&long_name, "   ").unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));

        let exact = "n".repeat(MAX_FIELD_LENGTH);
        assert!(CustomerInput::new(&exact, "b@x.com").is_ok());
    }

    #[test]
    fn email_shape_is_not_policed() {
        for email in ["admin@localhost", "bob@intranet", "no-at-sign"] {
            let input = CustomerInput::new("Bob", email).unwrap();
            assert_eq!(input.email(), email);
        }
    }

    #[test]
    fn non_object_bodies_read_as_empty() {
        for body in [json!(["Bob", "b@x.com"]), json!("Bob"), json!(42), json!(null)] {
            let payload = CustomerPayload::from_json(body);
            assert!(payload.name.is_none());
            assert!(payload.email.is_none());

            let errors = CustomerInput::from_payload(&payload).unwrap_err();
            assert!(errors.contains_key("name"));
            assert!(errors.contains_key("email"));
        }
    }

    #[test]
    fn serializes_without_owner() {
        let customer = Customer { id: 1, name: "Bob".into(), email: "b@x.com".into(), owner_id: 7 };
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value, json!({"id": 1, "name": "Bob", "email": "b@x.com"}));
    }
}
