use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::database::Paging;

/// Wrapper for successful responses that adds the `{status: true, message}`
/// envelope around optional `data` and `paging` blocks.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub data: Option<T>,
    pub paging: Option<Paging>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK carrying `data`
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::with_status(message, Some(data), StatusCode::OK)
    }

    /// 201 Created carrying `data`
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(message, Some(data), StatusCode::CREATED)
    }

    /// 200 OK with a list and its paging block
    pub fn paged(message: impl Into<String>, data: T, paging: Paging) -> Self {
        Self {
            paging: Some(paging),
            ..Self::success(message, data)
        }
    }

    pub fn with_status(message: impl Into<String>, data: Option<T>, status_code: StatusCode) -> Self {
        Self {
            message: message.into(),
            data,
            paging: None,
            status_code,
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK with no `data`
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::with_status(message, None, StatusCode::OK)
    }

    /// 204 No Content; the body is always empty
    pub fn no_content() -> Self {
        Self::with_status(String::new(), None, StatusCode::NO_CONTENT)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        if self.status_code == StatusCode::NO_CONTENT {
            return self.status_code.into_response();
        }

        let mut envelope = json!({
            "status": true,
            "message": self.message,
        });

        if let Some(data) = &self.data {
            match serde_json::to_value(data) {
                Ok(value) => envelope["data"] = value,
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "status": false,
                            "message": "Failed to serialize response data"
                        })),
                    )
                        .into_response();
                }
            }
        }

        if let Some(paging) = &self.paging {
            envelope["paging"] = json!(paging);
        }

        (self.status_code, Json::<Value>(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_wraps_data() {
        let response = ApiResponse::created("Created", json!({"id": 1})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"status": true, "message": "Created", "data": {"id": 1}})
        );
    }

    #[tokio::test]
    async fn paged_includes_paging_block() {
        let paging = Paging {
            page: 2,
            per_page: 10,
            total_pages: 2,
            total_items: 15,
        };
        let response = ApiResponse::paged("Listed", Vec::<i64>::new(), paging).into_response();
        let body = body_json(response).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(
            body["paging"],
            json!({"page": 2, "per_page": 10, "total_pages": 2, "total_items": 15})
        );
    }

    #[tokio::test]
    async fn no_content_has_empty_body() {
        let response = ApiResponse::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn message_only_omits_data() {
        let body = body_json(ApiResponse::message_only("Bye").into_response()).await;
        assert_eq!(body, json!({"status": true, "message": "Bye"}));
    }
}
