pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod security;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use sqlx::PgPool;

use services::media::MediaService;
use services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub tokens: Arc<TokenService>,
    pub media: Arc<MediaService>,
}
