use drill_core::ScriptedSource;
use chrono::Duration;
use drill_core::model::{DayKey, DrillSettingsDraft, Feedback, Field, SubmitOutcome, Variant};
use drill_core::time::fixed_now;
use services::{AppServices, Clock, SharedRandom};
use storage::repository::{ProgressRepository, Storage, StorageError};

#[tokio::test]
async fn drill_loop_counts_correct_answers() {
    let storage = Storage::in_memory();
    // Lv.3: divisor 7 with 50, then divisor 4 with 30.
    let rng = SharedRandom::new(ScriptedSource::new([7, 50, 4, 30]));
    let app = AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        rng,
        DrillSettingsDraft {
            daily_goal: Some(2),
            variant: None,
        },
    )
    .await
    .unwrap();
    let drill = app.drill();
    let mut session = drill.start(3, app.settings().variant());

    // 50 ÷ 7 = 7 r 1, first try wrong.
    session.press_digit(7);
    session.focus(Field::Remainder);
    session.press_digit(0);
    let report = drill.submit(&mut session).await.unwrap();
    assert_eq!(report.outcome, SubmitOutcome::Incorrect);
    assert!(session.acknowledge());
    session.backspace();
    session.press_digit(1);
    let report = drill.submit(&mut session).await.unwrap();
    assert_eq!(report.outcome, SubmitOutcome::Correct);
    assert!(drill.advance(&mut session));

    // 30 ÷ 4 = 7 r 2.
    session.press_digit(7);
    session.focus(Field::Remainder);
    session.press_digit(2);
    let report = drill.submit(&mut session).await.unwrap();
    assert_eq!(report.today_count, Some(2));
    assert_eq!(session.feedback(), Feedback::Correct);
    assert_eq!(session.score(), 2);

    let snapshot = app.progress().snapshot().await.unwrap();
    assert_eq!(snapshot.today_count(), 2);
    assert!(snapshot.goal_met_today());
    assert_eq!(snapshot.current_streak(), 1);
}

#[tokio::test]
async fn overrides_are_persisted_for_next_launch() {
    let storage = Storage::in_memory();
    let first = AppServices::from_storage(
        storage.clone(),
        Clock::fixed(fixed_now()),
        SharedRandom::new(ScriptedSource::default()),
        DrillSettingsDraft {
            daily_goal: Some(12),
            variant: Some(Variant::Classic),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.settings().daily_goal(), 12);

    let second = AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        SharedRandom::new(ScriptedSource::default()),
        DrillSettingsDraft::default(),
    )
    .await
    .unwrap();
    assert_eq!(second.settings().daily_goal(), 12);
    assert_eq!(second.settings().variant(), Variant::Classic);
}

#[tokio::test]
async fn long_streak_survives_the_calendar_window() {
    let storage = Storage::in_memory();
    let today = Clock::fixed(fixed_now()).today();
    for back in 1..=100 {
        storage
            .progress
            .set_day_count(DayKey::new(today - Duration::days(back)), 10)
            .await
            .unwrap();
    }
    let app = AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        SharedRandom::new(ScriptedSource::default()),
        DrillSettingsDraft::default(),
    )
    .await
    .unwrap();

    let snapshot = app.progress().snapshot().await.unwrap();
    assert_eq!(snapshot.daily_goal(), 10);
    assert_eq!(snapshot.current_streak(), 100);
    assert!(!snapshot.goal_met_today());
}

struct FailingProgressRepo;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgressRepo {
    async fn increment_day(
        &self,
        _day: drill_core::model::DayKey,
    ) -> Result<u32, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set_day_count(
        &self,
        _day: drill_core::model::DayKey,
        _count: u32,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn counts_between(
        &self,
        _from: drill_core::model::DayKey,
        _until: drill_core::model::DayKey,
    ) -> Result<Vec<storage::repository::DayCountRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test]
async fn failed_increment_surfaces_but_keeps_correct_state() {
    let mut storage = Storage::in_memory();
    storage.progress = std::sync::Arc::new(FailingProgressRepo);
    let app = AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        SharedRandom::new(ScriptedSource::new([4, 7])),
        DrillSettingsDraft::default(),
    )
    .await
    .unwrap();
    let drill = app.drill();
    let mut session = drill.start(1, Variant::Standard);
    session.press_digit(7);

    assert!(drill.submit(&mut session).await.is_err());
    assert_eq!(session.feedback(), Feedback::Correct);
    assert_eq!(session.score(), 1);
}
