// handlers/protected/customers/mod.rs - customer CRUD for the token's owner
//
// Every handler receives the authenticated `CurrentUser` from the guard and
// passes its id to the repository, which scopes all reads and writes.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::database::models::customer::{CustomerId, CustomerInput, CustomerPayload};
use crate::error::{ApiError, CUSTOMER_NOT_FOUND};

pub mod create; // POST /api/customers
pub mod delete; // DELETE /api/customers/:id
pub mod list; // GET /api/customers
pub mod show; // GET /api/customers/:id
pub mod update; // PUT /api/customers/:id

pub use create::customer_post;
pub use delete::customer_delete;
pub use list::customers_get;
pub use show::customer_get;
pub use update::customer_put;

/// Path ids that are not integers cannot name a customer.
fn parse_id(raw: &str) -> Result<CustomerId, ApiError> {
    raw.parse::<CustomerId>()
        .map_err(|_| ApiError::not_found(CUSTOMER_NOT_FOUND))
}

/// Validate a create/update body. Unreadable JSON is a 422 like any other
/// invalid input; a non-object body reports both fields as missing.
fn validated_input(body: Result<Json<Value>, JsonRejection>) -> Result<CustomerInput, ApiError> {
    let Json(value) = body.map_err(|rejection| {
        ApiError::unprocessable_entity(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    Ok(CustomerInput::from_payload(&CustomerPayload::from_json(value))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("42").unwrap(), 42);
        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn body_validation_reports_fields() {
        let input = validated_input(Ok(Json(json!({"name": "Bob", "email": "b@x.com"})))).unwrap();
        assert_eq!(input.name(), "Bob");

        let err = validated_input(Ok(Json(json!({"email": "b@x.com"})))).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = err.to_json();
        assert!(body["errors"]["name"].is_string());
        assert!(body["errors"].get("email").is_none());

        let err = validated_input(Ok(Json(json!(["Bob", "b@x.com"])))).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = err.to_json();
        assert!(body["errors"]["name"].is_string());
        assert!(body["errors"]["email"].is_string());

        let err = validated_input(Ok(Json(json!("not an object")))).unwrap_err();
        let body = err.to_json();
        assert!(body["errors"]["name"].is_string());
        assert!(body["errors"]["email"].is_string());
    }
}
