use async_trait::async_trait;
use drill_core::model::DrillSettings;

use crate::repository::{SettingsRepository, StorageError};

use super::SqliteRepository;
use super::mapping::map_settings_row;

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<DrillSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT daily_goal, variant
            FROM drill_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_settings_row).transpose()
    }

    async fn save_settings(&self, settings: &DrillSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO drill_settings (id, daily_goal, variant)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                daily_goal = excluded.daily_goal,
                variant = excluded.variant
            ",
        )
        .bind(1_i64)
        .bind(i64::from(settings.daily_goal()))
        .bind(settings.variant().as_str())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
