use customers::{
    config::{Config, CustomerStore, DEFAULT_LOG_DIRECTIVES},
    domain::customer::repository::CustomerRepository,
    infrastructure::{
        database::pool::{create_pool, run_migrations},
        logging::{init_tracing, tracing_logger::TracingLogger},
        repositories::{
            in_memory_customer_repository::InMemoryCustomerRepository,
            sqlx_customer_repository::SqlxCustomerRepository,
        },
    },
    presentation::http::{routes::create_router, state::AppState},
};
use http::{Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_LOG_DIRECTIVES);

    let config = Config::from_env()?;

    let customer_repo: Arc<dyn CustomerRepository> = match config.customer_store {
        CustomerStore::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
            let db = create_pool(database_url, config.database_max_connections).await?;
            run_migrations(&db, config.ignore_missing_migrations).await?;
            Arc::new(SqlxCustomerRepository::new(db))
        }
        CustomerStore::Memory => {
            tracing::warn!("Using in-memory customer store; data is lost on shutdown");
            Arc::new(InMemoryCustomerRepository::new())
        }
    };

    let state = AppState {
        customer_repo,
        logger: Arc::new(TracingLogger),
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Customer API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
