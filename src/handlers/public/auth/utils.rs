use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

/// Email/password body shared by register and login. Values of the wrong
/// JSON type are treated like missing ones.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    password: Option<Value>,
}

impl CredentialsPayload {
    /// Anything that is not a JSON object (including a malformed body)
    /// becomes an empty payload, which fails the required-fields check.
    pub fn from_body(body: Result<Json<Value>, JsonRejection>) -> Self {
        match body {
            Ok(Json(Value::Object(map))) => {
                serde_json::from_value(Value::Object(map)).unwrap_or_default()
            }
            Ok(Json(_)) => Self::default(),
            Err(rejection) => {
                tracing::debug!("Unreadable credentials body: {}", rejection.body_text());
                Self::default()
            }
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_ref().and_then(Value::as_str).unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}
