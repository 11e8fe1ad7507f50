use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub health_monitor: HealthMonitorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_env")]
    pub env: String,

    #[serde(default = "default_app_host")]
    pub host: String,

    #[serde(default = "default_app_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

/// Signing secrets and lifetimes for the access/refresh token pair.
/// Handed to the token service and session middleware at construction
/// rather than read from the environment at call sites.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,

    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: i64,

    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket_name: String,
    pub region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthMonitorConfig {
    /// Polling interval in seconds; 0 disables the monitor.
    #[serde(default = "default_health_interval")]
    pub interval_secs: u64,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

fn default_access_ttl() -> i64 {
    900 // 15 minutes
}

fn default_refresh_ttl() -> i64 {
    864000 // 10 days
}

fn default_cors_origins() -> String {
    "http://localhost:3000".to_string()
}

fn default_health_interval() -> u64 {
    60
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        let app = AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| default_app_env()),
            host: env::var("APP_HOST").unwrap_or_else(|_| default_app_host()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| default_app_port().to_string())
                .parse()
                .unwrap_or(default_app_port()),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| default_db_max_connections().to_string())
                .parse()
                .unwrap_or(default_db_max_connections()),
        };

        let token = TokenConfig {
            access_secret: env::var("ACCESS_TOKEN_SECRET")?,
            refresh_secret: env::var("REFRESH_TOKEN_SECRET")?,
            access_ttl_secs: env::var("ACCESS_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| default_access_ttl().to_string())
                .parse()
                .unwrap_or(default_access_ttl()),
            refresh_ttl_secs: env::var("REFRESH_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| default_refresh_ttl().to_string())
                .parse()
                .unwrap_or(default_refresh_ttl()),
        };

        let cors = CorsConfig {
            allowed_origins: env::var("CORS_ORIGIN").unwrap_or_else(|_| default_cors_origins()),
        };

        let storage = StorageConfig {
            bucket_name: env::var("STORAGE_BUCKET").unwrap_or_default(),
            region: env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            aws_access_key_id: env::var("STORAGE_ACCESS_KEY_ID").unwrap_or_default(),
            aws_secret_access_key: env::var("STORAGE_SECRET_ACCESS_KEY").unwrap_or_default(),
            endpoint: env::var("STORAGE_ENDPOINT").ok(),
        };

        let health_monitor = HealthMonitorConfig {
            interval_secs: env::var("HEALTHCHECK_INTERVAL_SECS")
                .unwrap_or_else(|_| default_health_interval().to_string())
                .parse()
                .unwrap_or(default_health_interval()),
        };

        Ok(Config {
            app,
            database,
            token,
            cors,
            storage,
            health_monitor,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_env(), "development");
        assert_eq!(default_app_host(), "0.0.0.0");
        assert_eq!(default_app_port(), 8080);
        assert_eq!(default_db_max_connections(), 20);
        assert_eq!(default_access_ttl(), 900);
        assert_eq!(default_refresh_ttl(), 864000);
    }
}
