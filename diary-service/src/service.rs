use chrono::NaiveDate;
use common::errors::AppError;
use common::models::DiaryEntry;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::diary_store::DiaryStore;
use crate::provider::WeatherProvider;

/// Accepted calendar window for new entries. The bounds are configuration;
/// anything outside is rejected before any weather lookup happens.
#[derive(Debug, Clone, Copy)]
pub struct DateWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateWindow {
    fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

/// Diary CRUD composed over weather resolution and entry storage
pub struct DiaryService {
    provider: WeatherProvider,
    store: Arc<dyn DiaryStore>,
    window: DateWindow,
}

impl DiaryService {
    pub fn new(provider: WeatherProvider, store: Arc<dyn DiaryStore>, window: DateWindow) -> Self {
        Self {
            provider,
            store,
            window,
        }
    }

    /// Create an entry for a date, embedding a copy of the resolved weather.
    /// A failed weather resolution fails the create; nothing is stored.
    #[instrument(skip(self, text), fields(date = %date))]
    pub async fn create(&self, date: NaiveDate, text: String) -> Result<DiaryEntry, AppError> {
        if !self.window.contains(date) {
            return Err(AppError::validation(format!(
                "Date {} is outside the accepted window {}..{}",
                date, self.window.min, self.window.max
            )));
        }

        let weather = self.provider.resolve(date).await?;
        let entry = self.store.insert(date, &text, &weather).await?;

        info!(id = %entry.id, "Created diary entry");
        Ok(entry)
    }

    /// All entries for a date, oldest first; empty is success, not an error
    pub async fn read_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, AppError> {
        self.store.find_by_date(date).await
    }

    /// All entries with date in [start, end] inclusive
    pub async fn read_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, AppError> {
        if end < start {
            return Err(AppError::validation(format!(
                "Invalid range: end {} is before start {}",
                end, start
            )));
        }

        self.store.find_by_range(start, end).await
    }

    /// Overwrite the text of the first entry for a date. An absent target is
    /// an explicit not-found error, never an implicit create.
    #[instrument(skip(self, text), fields(date = %date))]
    pub async fn update(&self, date: NaiveDate, text: String) -> Result<(), AppError> {
        let Some(entry) = self.store.first_by_date(date).await? else {
            return Err(AppError::not_found(format!("No diary entry for {}", date)));
        };

        self.store.update_text(entry.id, &text).await?;
        info!(id = %entry.id, "Updated diary entry");
        Ok(())
    }

    /// Remove every entry for the date; zero matches is still success
    #[instrument(skip(self), fields(date = %date))]
    pub async fn delete(&self, date: NaiveDate) -> Result<(), AppError> {
        let removed = self.store.delete_by_date(date).await?;
        info!(removed, "Deleted diary entries");
        Ok(())
    }
}
