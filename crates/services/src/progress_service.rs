use std::sync::Arc;

use chrono::Duration;
use drill_core::model::{DailyProgress, DayKey};
use storage::repository::{ProgressRepository, SettingsRepository};
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::ProgressServiceError;

/// Days of history loaded per query, not counting today.
pub const SNAPSHOT_WINDOW_DAYS: i64 = 62;

/// Reads and bumps the per-day count of correct answers.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    counts: Arc<dyn ProgressRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        counts: Arc<dyn ProgressRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            clock,
            counts,
            settings,
        }
    }

    #[must_use]
    pub fn today(&self) -> DayKey {
        DayKey::new(self.clock.today())
    }

    /// Current counts, today's count and the daily goal.
    ///
    /// The window covers the calendar; while the streak runs past its start,
    /// older history is loaded one window at a time so the streak is never cut.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn snapshot(&self) -> Result<DailyProgress, ProgressServiceError> {
        let today = self.today();
        let goal = self.daily_goal().await?;
        let mut from = Self::window_start(today);
        let records = self.counts.counts_between(from, today).await?;
        let mut progress = DailyProgress::new(
            records.into_iter().map(|record| (record.day, record.count)),
            today,
            goal,
        );

        while progress.streak_start() == Some(from) {
            let until = from.previous();
            from = Self::window_start(until);
            let older = self.counts.counts_between(from, until).await?;
            if older.is_empty() {
                break;
            }
            progress.extend_history(older.into_iter().map(|record| (record.day, record.count)));
        }
        debug!(
            today = %today,
            from = %from,
            streak = progress.current_streak(),
            "progress snapshot loaded"
        );
        Ok(progress)
    }

    /// Add one correct answer to today's count and return the new total.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the count could not be written.
    pub async fn increment(&self) -> Result<u32, ProgressServiceError> {
        let today = self.today();
        let count = self.counts.increment_day(today).await?;
        // The count is already saved; a failed goal read only skips the log line.
        match self.daily_goal().await {
            Ok(goal) if count == goal => info!(day = %today, goal, "daily goal reached"),
            Ok(_) => {}
            Err(err) => warn!(error = %err, day = %today, "could not read daily goal"),
        }
        Ok(count)
    }

    fn window_start(day: DayKey) -> DayKey {
        DayKey::new(day.date() - Duration::days(SNAPSHOT_WINDOW_DAYS))
    }

    async fn daily_goal(&self) -> Result<u32, ProgressServiceError> {
        let settings = self.settings.get_settings().await?.unwrap_or_default();
        Ok(settings.daily_goal())
    }
}
