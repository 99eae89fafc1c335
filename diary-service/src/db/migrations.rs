use sqlx::PgPool;
use tracing::info;

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    // One weather snapshot per calendar date; the primary key backs the
    // upsert the daily refresh relies on.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS date_weather (
            date DATE PRIMARY KEY,
            condition VARCHAR(64) NOT NULL,
            icon VARCHAR(16) NOT NULL,
            temperature DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Diary entries denormalize their weather columns; there is no foreign
    // key to date_weather on purpose.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS diary (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date DATE NOT NULL,
            text TEXT NOT NULL,
            condition VARCHAR(64) NOT NULL,
            icon VARCHAR(16) NOT NULL,
            temperature DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_diary_date ON diary (date)
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database migrations completed successfully");
    Ok(())
}
