use thiserror::Error;

use crate::model::Variant;

pub const DEFAULT_DAILY_GOAL: u32 = 10;
pub const MAX_DAILY_GOAL: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("daily goal must be between 1 and {MAX_DAILY_GOAL}, got {0}")]
    InvalidDailyGoal(u32),
}

/// Persisted player preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrillSettings {
    daily_goal: u32,
    variant: Variant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrillSettingsDraft {
    pub daily_goal: Option<u32>,
    pub variant: Option<Variant>,
}

impl DrillSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft from existing settings so single fields can be overridden.
    #[must_use]
    pub fn from_settings(settings: &DrillSettings) -> Self {
        Self {
            daily_goal: Some(settings.daily_goal),
            variant: Some(settings.variant),
        }
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidDailyGoal` if the goal is zero or above
    /// `MAX_DAILY_GOAL`.
    pub fn validate(self) -> Result<DrillSettings, SettingsError> {
        let daily_goal = self.daily_goal.unwrap_or(DEFAULT_DAILY_GOAL);
        if daily_goal == 0 || daily_goal > MAX_DAILY_GOAL {
            return Err(SettingsError::InvalidDailyGoal(daily_goal));
        }
        Ok(DrillSettings {
            daily_goal,
            variant: self.variant.unwrap_or_default(),
        })
    }
}

impl DrillSettings {
    /// Rehydrate settings from storage.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored goal is out of range.
    pub fn from_persisted(daily_goal: u32, variant: Variant) -> Result<Self, SettingsError> {
        DrillSettingsDraft {
            daily_goal: Some(daily_goal),
            variant: Some(variant),
        }
        .validate()
    }

    #[must_use]
    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            variant: Variant::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_uses_defaults() {
        let settings = DrillSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, DrillSettings::default());
        assert_eq!(settings.daily_goal(), 10);
        assert_eq!(settings.variant(), Variant::Standard);
    }

    #[test]
    fn rejects_out_of_range_goal() {
        let draft = DrillSettingsDraft {
            daily_goal: Some(0),
            ..DrillSettingsDraft::default()
        };
        assert_eq!(draft.validate(), Err(SettingsError::InvalidDailyGoal(0)));
        assert!(DrillSettings::from_persisted(101, Variant::Classic).is_err());
    }

    #[test]
    fn draft_overrides_single_field() {
        let current = DrillSettings::from_persisted(5, Variant::Classic).unwrap();
        let mut draft = DrillSettingsDraft::from_settings(&current);
        draft.daily_goal = Some(20);
        let updated = draft.validate().unwrap();
        assert_eq!(updated.daily_goal(), 20);
        assert_eq!(updated.variant(), Variant::Classic);
    }
}
