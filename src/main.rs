use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use quill::cache::PageCache;
use quill::db::{self, DbConfig};
use quill::session::SessionKeys;
use quill::{routes, Config};
use redis::aio::ConnectionManager;
use redis::RedisError;
use sqlx::PgPool;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: PgPool,
    redis: ConnectionManager,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }

    async fn check_redis(&self) -> Result<(), RedisError> {
        let mut conn = self.redis.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(RedisError::from((
                redis::ErrorKind::ResponseError,
                "unexpected PING response",
            )))
        }
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    let postgres = state.check_postgres().await;
    let redis = state.check_redis().await;

    match (&postgres, &redis) {
        (Ok(()), Ok(())) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "quill",
            "version": env!("CARGO_PKG_VERSION")
        })),
        _ => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "postgres": postgres.err().map(|e| e.to_string()),
            "redis": redis.err().map(|e| e.to_string()),
            "service": "quill"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting quill v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_cfg = DbConfig::new(&config.database.url, config.database.max_connections);
    let db_pool = match db::create_pool(&db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("migrations failed: {e}")))?;
    tracing::info!("Database migrations applied");

    let redis_client = redis::Client::open(config.cache.url.as_str())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("invalid Redis URL: {e}")))?;
    let redis_manager = ConnectionManager::new(redis_client).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize Redis connection: {e}"),
        )
    })?;

    let page_cache = PageCache::new(redis_manager.clone(), config.feed.page_cache_ttl_secs);
    let session_keys = SessionKeys::new(&config.auth.session_secret, &config.auth.login_url);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let pool_data = web::Data::new(db_pool.clone());
    let cache_data = web::Data::new(page_cache);
    let config_data = web::Data::new(config.clone());
    let session_data = web::Data::new(session_keys);
    let health_state = web::Data::new(HealthState {
        db_pool,
        redis: redis_manager,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(cache_data.clone())
            .app_data(config_data.clone())
            .app_data(session_data.clone())
            .app_data(health_state.clone())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_summary))
            .route("/health/live", web::get().to(liveness_check))
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
