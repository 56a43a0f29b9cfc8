use dioxus::prelude::*;
use drill_core::model::{DayKey, DrillSession, Field, Level, Problem, Variant};
use drill_core::time::fixed_clock;
use storage::repository::{DayCountRecord, ProgressRepository, Storage, StorageError};

use super::test_harness::{ViewKind, setup_view_harness};
use crate::views::{AnswerBoxes, FeedbackPanel, Keypad};
use crate::vm::{FEEDBACK_CORRECT, map_game};

fn render(app: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(app);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_problem() {
    let mut harness = setup_view_harness(ViewKind::Game(1), Storage::in_memory(), &[4, 7]).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Lv.1"), "missing level in {html}");
    assert!(html.contains("1-digit ÷ 1-digit"), "missing label in {html}");
    assert!(html.contains(">28<"), "missing dividend in {html}");
    assert!(html.contains(">4<"), "missing divisor in {html}");
    assert!(!html.contains("Remainder"), "exact level shows remainder in {html}");

    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Today: 0 / 10"), "missing today count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_unknown_level_uses_default_problem() {
    let mut harness = setup_view_harness(ViewKind::Game(9), Storage::in_memory(), &[]).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Lv.9"), "missing level in {html}");
    assert!(html.contains(">10<"), "missing default dividend in {html}");
    assert!(html.contains(">2<"), "missing default divisor in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_levels_and_stamps() {
    let storage = Storage::in_memory();
    let today = DayKey::new(fixed_clock().today());
    storage.progress.set_day_count(today, 10).await.unwrap();
    storage
        .progress
        .set_day_count(today.previous(), 12)
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Home, storage, &[]).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Lv.7"), "missing level list in {html}");
    assert!(html.contains("3-digit ÷ 3-digit, with remainder"), "missing label in {html}");

    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("November 2023"), "missing month in {html}");
    assert!(html.contains("Today: 10 / 10"), "missing today in {html}");
    assert!(html.contains("Streak: 2 days"), "missing streak in {html}");
    assert!(html.contains("⭐"), "missing stamp in {html}");
}

struct FailingProgressRepo;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgressRepo {
    async fn increment_day(&self, _day: DayKey) -> Result<u32, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set_day_count(&self, _day: DayKey, _count: u32) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn counts_between(
        &self,
        _from: DayKey,
        _until: DayKey,
    ) -> Result<Vec<DayCountRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut storage = Storage::in_memory();
    storage.progress = std::sync::Arc::new(FailingProgressRepo);
    let mut harness = setup_view_harness(ViewKind::Home, storage, &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("could not be saved"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[test]
fn keypad_smoke_renders_all_digits() {
    fn app() -> Element {
        rsx! { Keypad { disabled: false, on_key: move |_| {} } }
    }
    let html = render(app);
    assert_eq!(html.matches("key digit").count(), 10);
    assert!(html.contains("Reset"));
    assert!(html.contains("Delete"));
}

#[test]
fn feedback_smoke_shows_next_after_correct() {
    fn app() -> Element {
        let mut session = DrillSession::with_problem(
            Level::new(1, Variant::Standard).unwrap(),
            Problem::new(28, 4).unwrap(),
        );
        session.press_digit(7);
        session.submit();
        let vm = map_game(&session);
        rsx! {
            FeedbackPanel {
                vm,
                pending: false,
                on_submit: move |()| {},
                on_next: move |()| {},
                on_retry: move |()| {},
            }
        }
    }
    let html = render(app);
    assert!(html.contains(FEEDBACK_CORRECT), "missing feedback in {html}");
    assert!(html.contains("Next"), "missing next in {html}");
    assert!(!html.contains("Done!"), "submit still visible in {html}");
}

#[test]
fn answer_boxes_smoke_show_remainder_when_enabled() {
    fn app() -> Element {
        let mut session = DrillSession::with_problem(
            Level::new(3, Variant::Standard).unwrap(),
            Problem::new(50, 7).unwrap(),
        );
        session.press_digit(7);
        session.focus(Field::Remainder);
        session.press_digit(1);
        let vm = map_game(&session);
        rsx! { AnswerBoxes { vm, on_focus: move |_| {} } }
    }
    let html = render(app);
    assert!(html.contains("Remainder"), "missing remainder in {html}");
    assert!(html.contains("answer-box remainder focused"), "missing focus in {html}");
}
