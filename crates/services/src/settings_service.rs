use std::sync::Arc;

use drill_core::model::{DrillSettings, DrillSettingsDraft};
use storage::repository::SettingsRepository;
use tracing::debug;

use crate::error::SettingsServiceError;

#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<DrillSettings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: DrillSettingsDraft,
    ) -> Result<DrillSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        debug!(
            daily_goal = settings.daily_goal(),
            variant = %settings.variant(),
            "saved drill settings"
        );
        Ok(settings)
    }

    /// Apply the set fields of `overrides` on top of the stored settings.
    ///
    /// Nothing is written when `overrides` is empty.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence fails.
    pub async fn apply_overrides(
        &self,
        overrides: DrillSettingsDraft,
    ) -> Result<DrillSettings, SettingsServiceError> {
        let current = self.load().await?;
        if overrides.daily_goal.is_none() && overrides.variant.is_none() {
            return Ok(current);
        }
        let mut draft = DrillSettingsDraft::from_settings(&current);
        if let Some(goal) = overrides.daily_goal {
            draft.daily_goal = Some(goal);
        }
        if let Some(variant) = overrides.variant {
            draft.variant = Some(variant);
        }
        self.save(draft).await
    }
}
