pub mod auth;
pub mod response;

pub use auth::{require_token, require_token_for_profile, CurrentUser};
pub use response::{ApiResponse, ApiResult};
