use chrono::NaiveDate;
use common::errors::AppError;
use common::models::WeatherSnapshot;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api_client::FetchWeather;
use crate::cache::WeatherStore;

/// Cache-aside weather resolution. The read path prefers the persisted daily
/// snapshot and falls back to a live fetch on miss, but never writes the
/// fallback result back into the store. Cache population belongs solely to
/// the daily refresh task, which keeps diary creation free of write-write
/// races on cold dates.
pub struct WeatherProvider {
    cache: Arc<dyn WeatherStore>,
    client: Arc<dyn FetchWeather>,
}

impl WeatherProvider {
    pub fn new(cache: Arc<dyn WeatherStore>, client: Arc<dyn FetchWeather>) -> Self {
        Self { cache, client }
    }

    /// Resolve the weather for a date. A cached snapshot is served as-is,
    /// whatever its date; on miss the live fetch result (dated today) is
    /// returned directly, and a failed fetch propagates to the caller.
    #[instrument(skip(self), fields(date = %date))]
    pub async fn resolve(&self, date: NaiveDate) -> Result<WeatherSnapshot, AppError> {
        if let Some(cached) = self.cache.get(date).await? {
            info!("Weather cache hit");
            return Ok(cached);
        }

        info!("Weather cache miss, falling back to live fetch");
        self.client.fetch_current().await
    }
}
