use async_trait::async_trait;
use chrono::NaiveDate;
use common::errors::AppError;
use common::models::{DiaryEntry, WeatherSnapshot};
use sqlx::PgPool;
use uuid::Uuid;

/// Persisted collection of diary entries. Multiple entries may share a date;
/// "first" means oldest by insertion order.
#[async_trait]
pub trait DiaryStore: Send + Sync {
    async fn insert(
        &self,
        date: NaiveDate,
        text: &str,
        weather: &WeatherSnapshot,
    ) -> Result<DiaryEntry, AppError>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, AppError>;

    /// Inclusive range query over [start, end]
    async fn find_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, AppError>;

    async fn first_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, AppError>;

    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), AppError>;

    /// Bulk delete of every entry for the date; returns the removed count
    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, AppError>;
}

pub struct PgDiaryStore {
    pool: PgPool,
}

impl PgDiaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiaryStore for PgDiaryStore {
    async fn insert(
        &self,
        date: NaiveDate,
        text: &str,
        weather: &WeatherSnapshot,
    ) -> Result<DiaryEntry, AppError> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary (date, text, condition, icon, temperature)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date, text, condition, icon, temperature
            "#,
        )
        .bind(date)
        .bind(text)
        .bind(&weather.condition)
        .bind(&weather.icon)
        .bind(weather.temperature)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, AppError> {
        let entries = sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, date, text, condition, icon, temperature
            FROM diary
            WHERE date = $1
            ORDER BY created_at
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn find_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, AppError> {
        let entries = sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, date, text, condition, icon, temperature
            FROM diary
            WHERE date BETWEEN $1 AND $2
            ORDER BY date, created_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn first_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, AppError> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, date, text, condition, icon, temperature
            FROM diary
            WHERE date = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE diary SET text = $1 WHERE id = $2
            "#,
        )
        .bind(text)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("No diary entry with id {}", id)));
        }

        Ok(())
    }

    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM diary WHERE date = $1
            "#,
        )
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
