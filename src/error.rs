// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::TokenError;
use crate::database::{CredentialError, DatabaseError, RepositoryError};
use crate::validation::FieldErrors;

pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";

/// HTTP API error with its status code and client-facing message. Every
/// variant renders as the `{status: false, message, errors?}` envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity
    UnprocessableEntity {
        message: String,
        field_errors: Option<FieldErrors>,
    },

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "status": false,
            "message": self.message(),
        });

        if let ApiError::UnprocessableEntity {
            field_errors: Some(errors),
            ..
        } = self
        {
            body["errors"] = json!(errors);
        }

        body
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// 422 with per-field messages under `errors`.
    pub fn validation(field_errors: FieldErrors) -> Self {
        ApiError::UnprocessableEntity {
            message: VALIDATION_MESSAGE.to_string(),
            field_errors: Some(field_errors),
        }
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(msg) => {
                // Callers normally classify these first
                tracing::warn!("Unclassified unique violation: {}", msg);
                ApiError::unprocessable_entity("Email must be unique.")
            }
            DatabaseError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) => {
                tracing::error!("Database pool timed out");
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Sqlx(e) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", e);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Validation(_)
            | CredentialError::WeakPassword
            | CredentialError::Conflict => ApiError::bad_request(err.to_string()),
            CredentialError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            CredentialError::Internal(msg) => {
                tracing::error!("Credential processing failed: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            CredentialError::Database(e) => e.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::not_found(CUSTOMER_NOT_FOUND),
            RepositoryError::Conflict => {
                let mut errors = FieldErrors::new();
                errors.insert("email".to_string(), RepositoryError::Conflict.to_string());
                ApiError::validation(errors)
            }
            RepositoryError::Database(e) => e.into(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::error!("Token generation failed: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::validation(errors)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_status_false_and_message() {
        let body = ApiError::not_found(CUSTOMER_NOT_FOUND).to_json();
        assert_eq!(body, json!({"status": false, "message": "Customer not found"}));
    }

    #[test]
    fn repository_conflict_reports_email_field() {
        let err = ApiError::from(RepositoryError::Conflict);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = err.to_json();
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["errors"]["email"], "Email must be unique.");
    }

    #[test]
    fn credential_errors_map_to_auth_statuses() {
        let conflict = ApiError::from(CredentialError::Conflict);
        assert_eq!(conflict.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(conflict.message(), "Email already exists.");

        let weak = ApiError::from(CredentialError::WeakPassword);
        assert_eq!(weak.status_code(), StatusCode::BAD_REQUEST);

        let bad_login = ApiError::from(CredentialError::InvalidCredentials);
        assert_eq!(bad_login.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(bad_login.message(), "Invalid email or password.");
    }

    #[test]
    fn internal_details_stay_out_of_the_body() {
        let err = ApiError::from(DatabaseError::Sqlx(sqlx::Error::Protocol(
            "near \"SELEC\": syntax error".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_json().to_string().contains("SELEC"));
    }
}
