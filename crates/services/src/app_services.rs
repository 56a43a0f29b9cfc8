use std::sync::Arc;

use drill_core::model::{DrillSettings, DrillSettingsDraft};
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::drill_service::DrillService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::rng::SharedRandom;
use crate::settings_service::SettingsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    settings: DrillSettings,
    progress: Arc<ProgressService>,
    drill: Arc<DrillService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// `overrides` (typically from the command line) are merged into the
    /// stored settings and saved.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or settings validation fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        overrides: DrillSettingsDraft,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        info!(db_url, "storage ready");
        Self::from_storage(storage, clock, SharedRandom::from_os(), overrides).await
    }

    /// Build services over an existing storage bundle.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if settings cannot be loaded or saved.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        rng: SharedRandom,
        overrides: DrillSettingsDraft,
    ) -> Result<Self, AppServicesError> {
        let settings = SettingsService::new(Arc::clone(&storage.settings))
            .apply_overrides(overrides)
            .await?;
        info!(
            daily_goal = settings.daily_goal(),
            variant = %settings.variant(),
            "settings loaded"
        );

        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.progress),
            Arc::clone(&storage.settings),
        ));
        let drill = Arc::new(DrillService::new(rng, Arc::clone(&progress)));

        Ok(Self {
            settings,
            progress,
            drill,
        })
    }

    /// Settings in effect at startup.
    #[must_use]
    pub fn settings(&self) -> DrillSettings {
        self.settings
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn drill(&self) -> Arc<DrillService> {
        Arc::clone(&self.drill)
    }
}
