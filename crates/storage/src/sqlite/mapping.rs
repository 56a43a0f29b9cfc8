use drill_core::model::{DayKey, DrillSettings, Variant};
use sqlx::Row;

use crate::repository::{DayCountRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn count_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("count out of range: {v}")))
}

pub(crate) fn map_day_count_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<DayCountRecord, StorageError> {
    let day: String = row.try_get("day").map_err(ser)?;
    let count: i64 = row.try_get("count").map_err(ser)?;
    Ok(DayCountRecord {
        day: DayKey::parse(&day).map_err(ser)?,
        count: count_from_i64(count)?,
    })
}

pub(crate) fn map_settings_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<DrillSettings, StorageError> {
    let daily_goal: i64 = row.try_get("daily_goal").map_err(ser)?;
    let variant: String = row.try_get("variant").map_err(ser)?;
    let variant: Variant = variant.parse().map_err(ser)?;
    DrillSettings::from_persisted(count_from_i64(daily_goal)?, variant).map_err(ser)
}
