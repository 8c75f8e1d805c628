//! Application state shared by all request handlers.

use crate::config::{JwtConfig, ListingConfig};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Cloning is cheap: services hold `Arc`s and the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Present when backed by PostgreSQL; health checks ping it.
    pub db_pool: Option<AsyncDbPool>,
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Wires PostgreSQL-backed repositories and services onto `pool`.
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig, listing: ListingConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        Self {
            services: Services::new(repos, listing),
            db_pool: Some(pool),
            jwt_config,
        }
    }

    /// State around prebuilt services, without a database pool.
    pub fn from_services(services: Services, jwt_config: JwtConfig) -> Self {
        Self {
            services,
            db_pool: None,
            jwt_config,
        }
    }
}
