use chrono::NaiveDate;
use std::env;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub weather_api_url: String,
    pub weather_api_key: String,
    pub city: String,
    pub fetch_timeout_secs: u64,
    pub fetch_max_retries: u32,
    pub refresh_hour: u32,
    pub min_diary_date: NaiveDate,
    pub max_diary_date: NaiveDate,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3004),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".to_string()),
            weather_api_key: env::var("WEATHER_API_KEY").expect("WEATHER_API_KEY must be set"),
            city: env::var("WEATHER_CITY").unwrap_or_else(|_| "seoul".to_string()),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            fetch_max_retries: env::var("FETCH_MAX_RETRIES")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(2),
            // Hour-of-day for the daily cache refresh, 01:00 by default
            refresh_hour: env::var("REFRESH_HOUR")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h| *h < 24)
                .unwrap_or(1),
            min_diary_date: date_from_env("DIARY_MIN_DATE", (1900, 1, 1)),
            max_diary_date: date_from_env("DIARY_MAX_DATE", (3050, 1, 1)),
        }
    }
}

fn date_from_env(key: &str, default: (i32, u32, u32)) -> NaiveDate {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            NaiveDate::from_ymd_opt(default.0, default.1, default.2)
                .expect("default date is valid")
        })
}
