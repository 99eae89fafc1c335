use async_trait::async_trait;
use chrono::NaiveDate;
use common::errors::AppError;
use common::models::WeatherSnapshot;
use sqlx::PgPool;

/// Persisted mapping from calendar date to that day's weather snapshot
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Point lookup; `None` when no snapshot exists for the date
    async fn get(&self, date: NaiveDate) -> Result<Option<WeatherSnapshot>, AppError>;

    /// Upsert by date. Re-running the daily refresh overwrites the existing
    /// row, so duplicate writes never surface as errors.
    async fn put(&self, snapshot: &WeatherSnapshot) -> Result<(), AppError>;
}

pub struct PgWeatherStore {
    pool: PgPool,
}

impl PgWeatherStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeatherStore for PgWeatherStore {
    async fn get(&self, date: NaiveDate) -> Result<Option<WeatherSnapshot>, AppError> {
        let snapshot = sqlx::query_as::<_, WeatherSnapshot>(
            r#"
            SELECT date, condition, icon, temperature
            FROM date_weather
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    async fn put(&self, snapshot: &WeatherSnapshot) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO date_weather (date, condition, icon, temperature)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (date) DO UPDATE SET
                condition = EXCLUDED.condition,
                icon = EXCLUDED.icon,
                temperature = EXCLUDED.temperature
            "#,
        )
        .bind(snapshot.date)
        .bind(&snapshot.condition)
        .bind(&snapshot.icon)
        .bind(snapshot.temperature)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
