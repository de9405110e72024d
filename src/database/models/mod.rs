pub mod customer;
pub mod user;

pub use customer::{Customer, CustomerInput, CustomerPayload};
pub use user::User;
