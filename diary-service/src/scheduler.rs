use chrono::{Local, NaiveDateTime, TimeDelta};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api_client::FetchWeather;
use crate::cache::WeatherStore;

/// Background task that refreshes the weather cache once per day at a fixed
/// wall-clock hour. On a failed fetch it logs and skips; the next daily tick
/// is the implicit retry.
pub struct Scheduler {
    client: Arc<dyn FetchWeather>,
    cache: Arc<dyn WeatherStore>,
    refresh_hour: u32,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(
        client: Arc<dyn FetchWeather>,
        cache: Arc<dyn WeatherStore>,
        refresh_hour: u32,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            cache,
            refresh_hour,
            cancel,
        }
    }

    /// Spawn the refresh loop; it runs until the token is cancelled
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        info!(hour = self.refresh_hour, "Daily weather refresh task started");

        loop {
            let wait = until_next_tick(Local::now().naive_local(), self.refresh_hour);

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    refresh_once(self.client.as_ref(), self.cache.as_ref()).await;
                }
                _ = self.cancel.cancelled() => {
                    info!("Daily weather refresh task stopped");
                    break;
                }
            }
        }
    }
}

/// One refresh pass: fetch the current weather and upsert it under today's
/// date. Re-running within the same day overwrites the single row.
pub(crate) async fn refresh_once(client: &dyn FetchWeather, cache: &dyn WeatherStore) {
    match client.fetch_current().await {
        Ok(snapshot) => {
            let date = snapshot.date;
            match cache.put(&snapshot).await {
                Ok(()) => info!(%date, "Stored daily weather snapshot"),
                Err(e) => warn!(%date, error = %e, "Failed to store daily weather snapshot"),
            }
        }
        Err(e) => {
            warn!(error = %e, "Daily weather refresh failed, skipping until next tick");
        }
    }
}

/// Time until the next wall-clock occurrence of `hour`:00:00
pub(crate) fn until_next_tick(now: NaiveDateTime, hour: u32) -> Duration {
    let today_tick = now
        .date()
        .and_hms_opt(hour, 0, 0)
        .expect("refresh hour is validated at config load");

    let next = if today_tick > now {
        today_tick
    } else {
        today_tick + TimeDelta::days(1)
    };

    (next - now).to_std().unwrap_or(Duration::ZERO)
}
