pub mod credentials;
pub mod customers;
pub mod manager;
pub mod models;
pub mod paging;

pub use credentials::{CredentialError, CredentialStore};
pub use customers::{CustomerRepository, RepositoryError};
pub use manager::{DatabaseError, DatabaseManager, DbPool};
pub use paging::{Page, PageRequest, Paging};
