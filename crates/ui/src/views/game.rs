use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use drill_core::model::{Feedback, Field};
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{
    FEEDBACK_CORRECT, FEEDBACK_INCORRECT, GameIntent, GameVm, KEYPAD_DIGITS, KeypadKey,
    apply_local_intent, intent_from_keyboard, map_game,
};

#[component]
pub fn GameView(level: u8) -> Element {
    // Keyed so a new level always starts a fresh session.
    rsx! {
        GameScreen { key: "{level}", level }
    }
}

#[component]
fn GameScreen(level: u8) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let drill = ctx.drill();
    let progress = ctx.progress();
    let daily_goal = ctx.daily_goal();
    let variant = ctx.variant();

    let session = use_signal({
        let drill = drill.clone();
        move || drill.start(level, variant)
    });
    let pending = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);

    let today = use_resource(move || {
        let progress = progress.clone();
        async move {
            progress
                .snapshot()
                .await
                .map(|snapshot| snapshot.today_count())
                .map_err(|err| {
                    warn!(error = %err, "failed to load today's count");
                    ViewError::Storage
                })
        }
    });

    let dispatch = use_callback(move |intent: GameIntent| {
        let mut session = session;
        let mut pending = pending;
        let mut error = error;
        let mut today = today;

        if *pending.peek() {
            return;
        }
        match intent {
            GameIntent::Submit => {
                if !session.peek().can_submit() {
                    return;
                }
                let drill = drill.clone();
                pending.set(true);
                spawn(async move {
                    let mut local = session.peek().clone();
                    let result = drill.submit(&mut local).await;

                    // The session keeps its new state even if recording failed.
                    session.set(local);
                    pending.set(false);
                    match result {
                        Ok(report) => {
                            if report.today_count.is_some() {
                                today.restart();
                            }
                            error.set(None);
                        }
                        Err(err) => {
                            warn!(error = %err, "correct answer was not recorded");
                            error.set(Some(ViewError::Storage));
                        }
                    }
                });
            }
            GameIntent::Next => {
                drill.advance(&mut session.write());
            }
            other => {
                apply_local_intent(&mut session.write(), other);
            }
        }
    });

    let vm = map_game(&session.read());
    let today_label = match &*today.read() {
        Some(Ok(count)) => format!("Today: {count} / {daily_goal}"),
        _ => format!("Today: - / {daily_goal}"),
    };
    let locked = vm.keypad_locked() || pending();

    rsx! {
        div {
            class: "page game",
            tabindex: 0,
            onmounted: move |evt: MountedEvent| async move {
                let _ = evt.set_focus(true).await;
            },
            onkeydown: move |evt: KeyboardEvent| {
                let key = evt.key().to_string();
                if key == "Escape" {
                    evt.prevent_default();
                    navigator.push(Route::Home {});
                    return;
                }
                let feedback = session.peek().feedback();
                if let Some(intent) = intent_from_keyboard(&key, feedback) {
                    evt.prevent_default();
                    dispatch.call(intent);
                }
            },

            header { class: "game-header",
                Link { class: "back-button", to: Route::Home {}, "← Back" }
                div { class: "game-level",
                    span { class: "muted", "Division" }
                    span { class: "level-title", "{vm.level_title}" }
                    span { class: "level-label", "{vm.level_label}" }
                }
                div { class: "score",
                    span { "⭐" }
                    span { class: "score-value", "{vm.score}" }
                }
            }
            p { class: "today-count", "{today_label}" }

            div { class: "problem",
                span { class: "operand", "{vm.dividend}" }
                span { class: "operator", "{vm.operator}" }
                span { class: "operand", "{vm.divisor}" }
                span { "=" }
                AnswerBoxes {
                    vm: vm.clone(),
                    on_focus: move |field| dispatch.call(GameIntent::Focus(field)),
                }
            }

            Keypad {
                disabled: locked,
                on_key: move |key| dispatch.call(GameIntent::Key(key)),
            }

            FeedbackPanel {
                vm: vm.clone(),
                pending: pending(),
                on_submit: move |()| dispatch.call(GameIntent::Submit),
                on_next: move |()| dispatch.call(GameIntent::Next),
                on_retry: move |()| dispatch.call(GameIntent::Retry),
            }

            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}

#[component]
pub fn AnswerBoxes(vm: GameVm, on_focus: EventHandler<Field>) -> Element {
    rsx! {
        div { class: "answer-row",
            div {
                class: vm.answer_box_class(Field::Quotient),
                onclick: move |_| on_focus.call(Field::Quotient),
                span { class: "answer-caption", "Answer" }
                span { class: "answer-text", "{vm.quotient_text}" }
            }
            if vm.show_remainder {
                span { class: "remainder-sep", "r" }
                div {
                    class: vm.answer_box_class(Field::Remainder),
                    onclick: move |_| on_focus.call(Field::Remainder),
                    span { class: "answer-caption", "Remainder" }
                    span { class: "answer-text", "{vm.remainder_text}" }
                }
            }
        }
    }
}

#[component]
pub fn Keypad(disabled: bool, on_key: EventHandler<KeypadKey>) -> Element {
    rsx! {
        div { class: "keypad",
            for digit in KEYPAD_DIGITS {
                button {
                    key: "{digit}",
                    class: "key digit",
                    disabled,
                    onclick: move |_| on_key.call(KeypadKey::Digit(digit)),
                    "{digit}"
                }
            }
        }
        div { class: "keypad-actions",
            button {
                class: "key clear",
                disabled,
                onclick: move |_| on_key.call(KeypadKey::Clear),
                "↺ Reset"
            }
            button {
                class: "key backspace",
                disabled,
                onclick: move |_| on_key.call(KeypadKey::Backspace),
                "⌫ Delete"
            }
        }
    }
}

#[component]
pub fn FeedbackPanel(
    vm: GameVm,
    pending: bool,
    on_submit: EventHandler<()>,
    on_next: EventHandler<()>,
    on_retry: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "feedback",
            match vm.feedback {
                Feedback::None => rsx! {
                    if vm.can_submit {
                        button {
                            class: "submit",
                            disabled: pending,
                            onclick: move |_| on_submit.call(()),
                            "Done!"
                        }
                    }
                },
                Feedback::Correct => rsx! {
                    div { class: "feedback-correct", "{FEEDBACK_CORRECT}" }
                    button { class: "next", onclick: move |_| on_next.call(()), "Next →" }
                },
                Feedback::Incorrect => rsx! {
                    div { class: "feedback-incorrect", "{FEEDBACK_INCORRECT}" }
                    button { class: "retry", onclick: move |_| on_retry.call(()), "Try again" }
                },
            }
        }
    }
}
