use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("invalid day key: {0}")]
    InvalidDayKey(String),

    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Calendar day used to bucket practice counts, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a stored `YYYY-MM-DD` key.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidDayKey` for anything else.
    pub fn parse(raw: &str) -> Result<Self, ProgressError> {
        NaiveDate::parse_from_str(raw, Self::FORMAT)
            .map(Self)
            .map_err(|_| ProgressError::InvalidDayKey(raw.to_string()))
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn previous(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Snapshot of practice counts around today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyProgress {
    counts: BTreeMap<DayKey, u32>,
    today: DayKey,
    daily_goal: u32,
}

impl DailyProgress {
    #[must_use]
    pub fn new(
        counts: impl IntoIterator<Item = (DayKey, u32)>,
        today: DayKey,
        daily_goal: u32,
    ) -> Self {
        Self {
            counts: counts.into_iter().collect(),
            today,
            daily_goal: daily_goal.max(1),
        }
    }

    #[must_use]
    pub fn counts(&self) -> &BTreeMap<DayKey, u32> {
        &self.counts
    }

    #[must_use]
    pub fn today(&self) -> DayKey {
        self.today
    }

    #[must_use]
    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    #[must_use]
    pub fn count_on(&self, day: DayKey) -> u32 {
        self.counts.get(&day).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn today_count(&self) -> u32 {
        self.count_on(self.today)
    }

    #[must_use]
    pub fn goal_met_on(&self, day: DayKey) -> bool {
        self.count_on(day) >= self.daily_goal
    }

    #[must_use]
    pub fn goal_met_today(&self) -> bool {
        self.goal_met_on(self.today)
    }

    /// Correct answers still needed today.
    #[must_use]
    pub fn remaining_today(&self) -> u32 {
        self.daily_goal.saturating_sub(self.today_count())
    }

    /// Consecutive goal-met days ending today.
    ///
    /// An unfinished today does not break the run that ended yesterday.
    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.streak_days().fold(0_u32, |streak, _| streak.saturating_add(1))
    }

    /// Earliest day of the current streak, if there is one.
    #[must_use]
    pub fn streak_start(&self) -> Option<DayKey> {
        self.streak_days().last()
    }

    /// Merge older counts into the snapshot. Existing days keep their count.
    pub fn extend_history(&mut self, counts: impl IntoIterator<Item = (DayKey, u32)>) {
        for (day, count) in counts {
            self.counts.entry(day).or_insert(count);
        }
    }

    fn streak_days(&self) -> impl Iterator<Item = DayKey> + '_ {
        let first = if self.goal_met_today() {
            self.today
        } else {
            self.today.previous()
        };
        std::iter::successors(Some(first), |day| Some(day.previous()))
            .take_while(|day| self.goal_met_on(*day))
    }

    /// Record one more answer for today.
    pub fn record_today(&mut self) -> u32 {
        let count = self.counts.entry(self.today).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Month grid for the stamp calendar, Sunday-first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidMonth` if the month does not exist.
    pub fn calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, ProgressError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ProgressError::InvalidMonth { year, month })?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(ProgressError::InvalidMonth { year, month })?;

        let leading_blanks = first.weekday().num_days_from_sunday();
        let days = first
            .iter_days()
            .take_while(|date| *date < next_first)
            .map(|date| {
                let key = DayKey::new(date);
                let count = self.count_on(key);
                CalendarDay {
                    day: key,
                    count,
                    stamped: count >= self.daily_goal,
                    is_today: key == self.today,
                }
            })
            .collect();

        Ok(CalendarMonth {
            year,
            month,
            leading_blanks,
            days,
        })
    }

    /// Calendar for the month containing today.
    #[must_use]
    pub fn current_month(&self) -> CalendarMonth {
        let date = self.today.date();
        // The month of an existing date always exists.
        self.calendar_month(date.year(), date.month())
            .unwrap_or_else(|_| CalendarMonth {
                year: date.year(),
                month: date.month(),
                leading_blanks: 0,
                days: Vec::new(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first week.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    #[must_use]
    pub fn stamped_days(&self) -> usize {
        self.days.iter().filter(|day| day.stamped).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: DayKey,
    pub count: u32,
    pub stamped: bool,
    pub is_today: bool,
}
