use std::sync::Arc;

use fittrack_api::config::Config;
use fittrack_api::db::{create_pool, Store};
use fittrack_api::{app, handlers, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fittrack_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Store
    let pool = create_pool(&config.database_url).await;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let state = AppState::new(Store::new(pool), config.clone());

    if let Err(e) = handlers::seed::seed_if_empty(&state).await {
        tracing::error!(error = %e, "Seeding sample data failed");
    }

    // Schedule today's movement reminders from persisted settings
    match handlers::reminders::load_settings(&state).await {
        Ok(settings) => {
            if let Err(e) = handlers::reminders::apply_settings(&state, &settings).await {
                tracing::error!(error = %e, "Scheduling movement reminders failed");
            }
        }
        Err(e) => tracing::error!(error = %e, "Loading reminder settings failed"),
    }

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
