//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use blog_cache::{create_shared_pool, RedisPoolConfig, VerificationTtls};
use blog_common::{AppConfig, AppError};
use blog_db::{
    create_pool, PgArticleRepository, PgCategoryRepository, PgCommentRepository,
    PgUserRepository,
};
use blog_service::{
    BitmapCaptcha, HttpSmsGateway, LoggingSmsGateway, MediaStorage, ServiceContextBuilder,
    SmsGateway,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Room left in a request body for the text fields around an upload
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let storage = &config.storage;

    if !storage.media_url.starts_with('/') || storage.media_url.len() < 2 {
        return Err(AppError::Config(format!(
            "MEDIA_URL must be a path below the site root, got {:?}",
            storage.media_url
        )));
    }

    let pages = create_router()
        .layer(DefaultBodyLimit::max(storage.max_file_size_bytes() + FORM_OVERHEAD_BYTES));
    let pages = apply_middleware(
        pages,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = pages
        .merge(health_routes())
        .nest_service(&storage.media_url, ServeDir::new(&storage.upload_dir));

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = blog_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    let redis_pool = create_shared_pool(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let sms_gateway: Arc<dyn SmsGateway> = match &config.sms.gateway_url {
        Some(url) => {
            info!(url = %url, "Sending SMS codes through the HTTP gateway");
            Arc::new(HttpSmsGateway::new(url.clone()))
        }
        None => {
            warn!("SMS_GATEWAY_URL is not set; SMS codes are only logged");
            Arc::new(LoggingSmsGateway)
        }
    };

    let storage = MediaStorage::from_config(&config.storage);
    tokio::fs::create_dir_all(storage.root()).await.map_err(|e| {
        AppError::Config(format!(
            "Failed to create upload directory {}: {}",
            storage.root().display(),
            e
        ))
    })?;

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let category_repo = Arc::new(PgCategoryRepository::new(pool.clone()));
    let article_repo = Arc::new(PgArticleRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .user_repo(user_repo)
        .category_repo(category_repo)
        .article_repo(article_repo)
        .comment_repo(comment_repo)
        .sms_gateway(sms_gateway)
        .captcha(Arc::new(BitmapCaptcha))
        .storage(storage)
        .session_ttl_seconds(config.session.ttl_seconds)
        .verification_ttls(VerificationTtls::from(&config.verification))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let ip = config
        .api
        .host
        .parse::<std::net::IpAddr>()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST {:?}: {}", config.api.host, e)))?;
    let addr = SocketAddr::new(ip, config.api.port);

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state)?;

    // Run server
    run_server(app, addr).await
}
