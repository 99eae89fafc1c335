mod api_client;
mod cache;
mod config;
mod db;
mod diary_store;
mod handlers;
mod openapi;
mod provider;
mod scheduler;
mod service;
#[cfg(test)]
mod testutil;

use axum::{
    Router,
    routing::{get, post},
};
use common::tracing::init_tracing_pretty;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api_client::{FetchWeather, OpenWeatherClient};
use crate::cache::{PgWeatherStore, WeatherStore};
use crate::diary_store::PgDiaryStore;
use crate::provider::WeatherProvider;
use crate::scheduler::Scheduler;
use crate::service::{DateWindow, DiaryService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let config = config::Config::from_env();
    let cancellation_token = CancellationToken::new();

    let pool = db::create_pool(&config.database_url).await?;

    let weather_store: Arc<dyn WeatherStore> = Arc::new(PgWeatherStore::new(pool.clone()));
    let weather_client: Arc<dyn FetchWeather> = Arc::new(OpenWeatherClient::new(
        config.weather_api_url.clone(),
        config.city.clone(),
        config.weather_api_key.clone(),
        config.fetch_timeout_secs,
        config.fetch_max_retries,
    ));

    let scheduler = Scheduler::new(
        weather_client.clone(),
        weather_store.clone(),
        config.refresh_hour,
        cancellation_token.clone(),
    );
    let scheduler_handle = scheduler.spawn();

    let provider = WeatherProvider::new(weather_store, weather_client);
    let service = Arc::new(DiaryService::new(
        provider,
        Arc::new(PgDiaryStore::new(pool)),
        DateWindow {
            min: config.min_diary_date,
            max: config.max_diary_date,
        },
    ));

    let state = handlers::AppState { service };

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/diary",
            post(handlers::create_diary)
                .get(handlers::read_diary)
                .put(handlers::update_diary)
                .delete(handlers::delete_diary),
        )
        .route("/api/diary/range", get(handlers::read_diaries))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Diary service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancellation_token))
        .await?;

    if let Err(e) = scheduler_handle.await {
        warn!(error = %e, "Scheduler task did not shut down cleanly");
    }

    info!("Diary service stopped");
    Ok(())
}

async fn shutdown_signal(cancellation_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    // Stop the daily refresh task along with the server
    cancellation_token.cancel();
    warn!("Cancelled background tasks, shutting down gracefully...");
}
