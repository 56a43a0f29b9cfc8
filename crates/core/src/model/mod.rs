mod answer;
mod drill;
mod level;
mod problem;
mod progress;
mod settings;

pub use answer::{AnswerEntry, Feedback, Field, MAX_ANSWER_DIGITS};
pub use drill::{DrillSession, LevelChoice, RoundState, SubmitOutcome};
pub use level::{Draw, Level, LevelError, LevelSpec, RemainderPolicy, Variant};
pub use problem::{DIVISION_OPERATOR, Problem, ProblemError};
pub use progress::{CalendarDay, CalendarMonth, DailyProgress, DayKey, ProgressError};
pub use settings::{
    DEFAULT_DAILY_GOAL, DrillSettings, DrillSettingsDraft, MAX_DAILY_GOAL, SettingsError,
};
