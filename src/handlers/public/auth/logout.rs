use crate::middleware::ApiResponse;

/// POST /api/auth/logout - tokens are stateless, so there is nothing to
/// revoke; clients discard their token.
pub async fn logout_post() -> ApiResponse<()> {
    ApiResponse::message_only("Logout successful.")
}
