// handlers/mod.rs - two security tiers plus system endpoints
//
// Public (no auth) → Protected (bearer token)

pub mod protected;
pub mod public;
pub mod system;
