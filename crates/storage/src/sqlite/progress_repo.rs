use async_trait::async_trait;
use drill_core::model::DayKey;
use sqlx::Row;

use crate::repository::{DayCountRecord, ProgressRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{count_from_i64, map_day_count_row};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn increment_day(&self, day: DayKey) -> Result<u32, StorageError> {
        let row = sqlx::query(
            r"
            INSERT INTO daily_counts (day, count)
            VALUES (?1, 1)
            ON CONFLICT(day) DO UPDATE SET count = count + 1
            RETURNING count
            ",
        )
        .bind(day.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        count_from_i64(count)
    }

    async fn set_day_count(&self, day: DayKey, count: u32) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO daily_counts (day, count)
            VALUES (?1, ?2)
            ON CONFLICT(day) DO UPDATE SET count = excluded.count
            ",
        )
        .bind(day.to_string())
        .bind(i64::from(count))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn counts_between(
        &self,
        from: DayKey,
        until: DayKey,
    ) -> Result<Vec<DayCountRecord>, StorageError> {
        // `YYYY-MM-DD` sorts lexicographically in date order.
        let rows = sqlx::query(
            r"
            SELECT day, count
            FROM daily_counts
            WHERE day >= ?1 AND day <= ?2
            ORDER BY day ASC
            ",
        )
        .bind(from.to_string())
        .bind(until.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter().map(map_day_count_row).collect()
    }
}
