use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{repository::user, DbService};
use crate::utils::AppError;

/// Server state shared across all request handlers
///
/// Cloning is cheap: the pool is internally reference-counted and the JWT
/// service sits behind an Arc.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Initialize the server state
    ///
    /// Opens the database (running migrations), seeds the primary admin
    /// account and builds the JWT service.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_path).await?;
        let pool = db_service.pool;

        user::ensure_primary_admin(&pool, &config.admin_password)
            .await
            .map_err(AppError::from)?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), pool, jwt_service))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
