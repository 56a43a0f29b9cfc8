use async_trait::async_trait;
use drill_core::model::{DayKey, DrillSettings};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted count of correct answers for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCountRecord {
    pub day: DayKey,
    pub count: u32,
}

/// Repository contract for per-day practice counts.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Add one to the count stored for `day`, creating it at 1 if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the count cannot be stored.
    async fn increment_day(&self, day: DayKey) -> Result<u32, StorageError>;

    /// Overwrite the count stored for `day`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the count cannot be stored.
    async fn set_day_count(&self, day: DayKey, count: u32) -> Result<(), StorageError>;

    /// Counts for days in `from..=until`, oldest first. Days never practiced are omitted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn counts_between(
        &self,
        from: DayKey,
        until: DayKey,
    ) -> Result<Vec<DayCountRecord>, StorageError>;
}

/// Repository contract for the single settings row.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch persisted settings, if any were saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn get_settings(&self) -> Result<Option<DrillSettings>, StorageError>;

    /// Persist settings, replacing any previous row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &DrillSettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    counts: Arc<Mutex<BTreeMap<DayKey, u32>>>,
    settings: Arc<Mutex<Option<DrillSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn increment_day(&self, day: DayKey) -> Result<u32, StorageError> {
        let mut guard = self
            .counts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let count = guard.entry(day).or_insert(0);
        *count = count.saturating_add(1);
        Ok(*count)
    }

    async fn set_day_count(&self, day: DayKey, count: u32) -> Result<(), StorageError> {
        let mut guard = self
            .counts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(day, count);
        Ok(())
    }

    async fn counts_between(
        &self,
        from: DayKey,
        until: DayKey,
    ) -> Result<Vec<DayCountRecord>, StorageError> {
        if from > until {
            return Ok(Vec::new());
        }
        let guard = self
            .counts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .range(from..=until)
            .map(|(day, count)| DayCountRecord {
                day: *day,
                count: *count,
            })
            .collect())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<DrillSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_settings(&self, settings: &DrillSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(*settings);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self { progress, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drill_core::model::Variant;

    fn day(d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2026, 3, d).unwrap())
    }

    #[tokio::test]
    async fn increments_per_day() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.increment_day(day(1)).await.unwrap(), 1);
        assert_eq!(repo.increment_day(day(1)).await.unwrap(), 2);
        assert_eq!(repo.increment_day(day(2)).await.unwrap(), 1);

        let counts = repo.counts_between(day(1), day(2)).await.unwrap();
        assert_eq!(
            counts,
            vec![
                DayCountRecord {
                    day: day(1),
                    count: 2
                },
                DayCountRecord {
                    day: day(2),
                    count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn range_bounds_are_inclusive() {
        let repo = InMemoryRepository::new();
        for d in 1..=5 {
            repo.set_day_count(day(d), d).await.unwrap();
        }
        let counts = repo.counts_between(day(2), day(4)).await.unwrap();
        let days: Vec<_> = counts.iter().map(|c| c.count).collect();
        assert_eq!(days, vec![2, 3, 4]);
        assert!(repo.counts_between(day(4), day(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let storage = Storage::in_memory();
        assert!(storage.settings.get_settings().await.unwrap().is_none());
        let settings = DrillSettings::from_persisted(7, Variant::Classic).unwrap();
        storage.settings.save_settings(&settings).await.unwrap();
        assert_eq!(storage.settings.get_settings().await.unwrap(), Some(settings));
    }
}
