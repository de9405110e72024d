// handlers/public/auth/mod.rs - token acquisition, no authentication required

pub mod login; // POST /api/auth/login
pub mod logout; // POST /api/auth/logout
pub mod register; // POST /api/auth/register
mod utils;

pub use login::login_post;
pub use logout::logout_post;
pub use register::register_post;
