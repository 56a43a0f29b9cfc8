#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    DayCountRecord, InMemoryRepository, ProgressRepository, SettingsRepository, Storage,
    StorageError,
};
