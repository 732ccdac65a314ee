//! Explicit wiring of stores, services and the HTTP application.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, HttpRequest};

use crate::auth::{AuthMiddleware, TokenService};
use crate::config::Config;
use crate::error::AppError;
use crate::routes::{self, health};
use crate::services::{TaskService, UserService};
use crate::store::{self, InMemoryTaskStore, InMemoryUserStore, TaskStore, UserStore};

/// Shared, cheaply clonable handles to every service a worker needs.
#[derive(Clone)]
pub struct AppServices {
    pub tokens: web::Data<TokenService>,
    pub users: web::Data<UserService>,
    pub tasks: web::Data<TaskService>,
}

impl AppServices {
    pub fn new(
        config: &Config,
        user_store: Arc<dyn UserStore>,
        task_store: Arc<dyn TaskStore>,
    ) -> Result<Self, AppError> {
        let tokens = TokenService::new(&config.jwt_secret, config.token_lifetime())?;
        Ok(Self {
            tokens: web::Data::new(tokens),
            users: web::Data::new(UserService::new(user_store, config.bcrypt_cost)),
            tasks: web::Data::new(TaskService::new(task_store)),
        })
    }

    /// Services backed by process-local stores.
    pub fn in_memory(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryTaskStore::new()),
        )
    }

    /// PostgreSQL when `DATABASE_URL` is set, in-memory stores otherwise.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        match &config.database_url {
            Some(url) => {
                let pool = store::postgres::connect(url, config.database_max_connections).await?;
                log::info!("using PostgreSQL storage");
                Self::new(
                    config,
                    Arc::new(store::PgUserStore::new(pool.clone())),
                    Arc::new(store::PgTaskStore::new(pool)),
                )
            }
            None => {
                log::warn!("DATABASE_URL not set, data will be kept in memory only");
                Self::in_memory(config)
            }
        }
    }

    /// Registers app data, the health check and the gated `/api` scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.users.clone())
            .app_data(self.tasks.clone())
            .app_data(json_config())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            );
    }
}

/// Malformed JSON bodies become `400 {"error": ...}` like every other client error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

/// CORS policy admitting the configured frontend origin.
pub fn cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
