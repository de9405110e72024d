use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{CredentialStore, CustomerRepository, DbPool};

/// Everything a request handler may touch. Cheap to clone; built once at
/// startup and handed to the router.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: DbPool,
    tokens: TokenService,
    credentials: CredentialStore,
    customers: CustomerRepository,
}

impl AppState {
    pub fn new(config: AppConfig, pool: DbPool) -> Self {
        let tokens = TokenService::from_config(&config.security);
        let credentials = CredentialStore::new(pool.clone(), config.security.bcrypt_cost);
        let customers = CustomerRepository::new(pool.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                credentials,
                customers,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn pool(&self) -> &DbPool {
        &self.inner.pool
    }

    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.inner.customers
    }
}
