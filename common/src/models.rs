use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One day's weather, captured at fetch time. At most one snapshot is
/// persisted per date; diary entries copy these fields by value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, sqlx::FromRow)]
pub struct WeatherSnapshot {
    pub date: NaiveDate,
    pub condition: String,
    pub icon: String,
    pub temperature: f64,
}

/// A diary entry with its embedded weather snapshot. The weather fields are
/// denormalized copies, not live references to the cache.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema, sqlx::FromRow)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub text: String,
    pub condition: String,
    pub icon: String,
    pub temperature: f64,
}

/// Request body for creating or updating a diary entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiaryRequest {
    #[schema(example = "2024-01-01")]
    pub date: NaiveDate,
    #[schema(example = "sunny day")]
    pub text: String,
}
