use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidtube::{
    config::Config,
    db::{create_pool, run_migrations},
    handlers, metrics,
    middleware::MetricsMiddleware,
    routes,
    services::{
        health_monitor,
        media::MediaService,
        token_service::{PgCredentialStore, TokenService},
    },
    AppState,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Container healthcheck subcommand: probe the HTTP endpoint and exit.
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" {
                let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8080".to_string());
                let url = format!("http://127.0.0.1:{port}/api/v1/healthcheck");
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"));
                    }
                }
            }
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting vidtube v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    handlers::health::init_uptime();
    metrics::init_metrics();

    // Create database connection pool
    let db_pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    // Run migrations in non-production unless explicitly skipped
    let run_migrations_env = std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".into());
    if !config.is_production() && run_migrations_env != "false" {
        tracing::info!("Running database migrations...");
        match run_migrations(&db_pool).await {
            Ok(_) => tracing::info!("Database migrations completed"),
            Err(e) => tracing::warn!("Skipping migrations due to error: {:#}", e),
        }
    } else {
        tracing::info!(
            "Skipping database migrations (RUN_MIGRATIONS={})",
            run_migrations_env
        );
    }

    // Token service over the Postgres credential store; signing secrets and
    // lifetimes travel inside the config object, not ambient lookups.
    let tokens = Arc::new(TokenService::new(
        Arc::new(PgCredentialStore::new(db_pool.clone())),
        config.token.clone(),
    ));

    // External media collaborators (object storage + duration probe)
    let media = Arc::new(MediaService::from_config(&config.storage).await);

    let state = AppState {
        db: db_pool.clone(),
        config: config.clone(),
        tokens: tokens.clone(),
        media,
    };

    // Background self health-check polling
    health_monitor::spawn(&config.health_monitor, config.app.port);

    let server_config = config.clone();
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration from allowed origins
        let mut cors = Cors::default();
        let mut with_credentials = true;

        for origin in server_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                // credentials cannot be combined with a wildcard origin
                cors = cors.allow_any_origin();
                with_credentials = false;
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }

        cors = cors.allow_any_method().allow_any_header().max_age(3600);
        if with_credentials {
            cors = cors.supports_credentials();
        }

        let tokens = tokens.clone();

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(MetricsMiddleware)
            // Prometheus metrics endpoint
            .route(
                "/metrics",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("text/plain; version=0.0.4")
                        .body(metrics::gather_metrics())
                }),
            )
            .configure(move |cfg| routes::configure_routes(cfg, tokens))
    })
    .bind(&bind_address)?
    .run()
    .await
}
