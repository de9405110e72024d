// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Route prefix: /api/*. The router wraps these in `require_token` (customers,
// 403 on failure) or `require_token_for_profile` (profile, 401 on failure),
// which put a `CurrentUser` in the request extensions.

pub mod auth;
pub mod customers;
