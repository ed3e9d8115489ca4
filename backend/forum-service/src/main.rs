use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use anyhow::{anyhow, Context};
use db_pool::{create_pool, DbConfig};
use forum_service::{handlers, init_database, middleware::MetricsMiddleware, Config, SERVICE_NAME};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn build_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else if !origin.is_empty() {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Forum Service
///
/// HTTP backend for the discussion forum: login by username, topics, posts
/// and comments. Storage is a single SQLite database migrated and seeded at
/// startup.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env().map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.env);

    let mut db_cfg = DbConfig::from_env(SERVICE_NAME).unwrap_or_else(|_| DbConfig {
        service_name: SERVICE_NAME.to_string(),
        ..DbConfig::default()
    });
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if std::env::var("DB_MAX_CONNECTIONS").is_err() {
        db_cfg.max_connections = config.database.max_connections;
    }
    db_cfg.log_config();

    let pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    if let Err(e) = init_database(&pool, config.seed.demo_content).await {
        error!("Database initialization failed: {}", e);
        pool.close().await;
        return Err(anyhow!("Failed to initialize database: {}", e));
    }

    let bind_address = config.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();
    let pool_http = pool.clone();

    info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool_http.clone()))
            .wrap(MetricsMiddleware)
            .wrap(build_cors(&allowed_origins))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .workers(config.app.workers)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let outcome = tokio::select! {
        result = &mut server_task => match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(anyhow!("HTTP server error: {}", e)),
            Err(e) => Err(anyhow!("HTTP server task failed: {}", e)),
        },
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            server_handle.stop(true).await;
            if let Err(e) = server_task.await {
                warn!("HTTP server task did not finish cleanly: {}", e);
            }
            Ok(())
        }
    };

    pool.close().await;
    info!("{} shut down", SERVICE_NAME);

    outcome
}
