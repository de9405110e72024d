pub mod profile; // GET /api/auth/profile

pub use profile::profile_get;
