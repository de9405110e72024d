// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Registration, login and logout. Everything else lives behind the bearer
// token guard in `protected`.

pub mod auth;
