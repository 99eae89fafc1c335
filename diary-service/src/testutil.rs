//! In-memory store and client fakes backing the unit tests

use async_trait::async_trait;
use chrono::NaiveDate;
use common::errors::AppError;
use common::models::{DiaryEntry, WeatherSnapshot};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api_client::FetchWeather;
use crate::cache::WeatherStore;
use crate::diary_store::DiaryStore;

pub fn snapshot(date: NaiveDate, condition: &str, icon: &str, temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        date,
        condition: condition.to_string(),
        icon: icon.to_string(),
        temperature,
    }
}

/// Weather client fake that counts calls and either returns a fixed snapshot
/// or fails every time
pub struct FakeWeatherClient {
    snapshot: Option<WeatherSnapshot>,
    calls: AtomicUsize,
}

impl FakeWeatherClient {
    pub fn returning(snapshot: WeatherSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            snapshot: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FetchWeather for FakeWeatherClient {
    async fn fetch_current(&self) -> Result<WeatherSnapshot, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.snapshot {
            Some(s) => Ok(s.clone()),
            None => Err(AppError::timeout("fake weather client is configured to fail")),
        }
    }
}

pub struct MemoryWeatherStore {
    rows: RwLock<HashMap<NaiveDate, WeatherSnapshot>>,
}

impl MemoryWeatherStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl WeatherStore for MemoryWeatherStore {
    async fn get(&self, date: NaiveDate) -> Result<Option<WeatherSnapshot>, AppError> {
        Ok(self.rows.read().await.get(&date).cloned())
    }

    async fn put(&self, snapshot: &WeatherSnapshot) -> Result<(), AppError> {
        self.rows
            .write()
            .await
            .insert(snapshot.date, snapshot.clone());
        Ok(())
    }
}

/// Vec-backed diary store; iteration order is insertion order, which is what
/// "first entry for a date" means in the real table as well
pub struct MemoryDiaryStore {
    rows: RwLock<Vec<DiaryEntry>>,
}

impl MemoryDiaryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DiaryStore for MemoryDiaryStore {
    async fn insert(
        &self,
        date: NaiveDate,
        text: &str,
        weather: &WeatherSnapshot,
    ) -> Result<DiaryEntry, AppError> {
        let entry = DiaryEntry {
            id: Uuid::new_v4(),
            date,
            text: text.to_string(),
            condition: weather.condition.clone(),
            icon: weather.icon.clone(),
            temperature: weather.temperature,
        };
        self.rows.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, AppError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }

    async fn find_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, AppError> {
        let mut entries: Vec<DiaryEntry> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|e| start <= e.date && e.date <= end)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn first_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, AppError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|e| e.date == date)
            .cloned())
    }

    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.text = text.to_string();
                Ok(())
            }
            None => Err(AppError::not_found(format!("No diary entry with id {}", id))),
        }
    }

    async fn delete_by_date(&self, date: NaiveDate) -> Result<u64, AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|e| e.date != date);
        Ok((before - rows.len()) as u64)
    }
}
