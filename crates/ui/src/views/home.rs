use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{StampCalendar, ViewError, ViewState, view_state_from_resource};
use crate::vm::{LevelCardVm, map_calendar, map_level_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let cards = map_level_cards(ctx.variant());

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let snapshot = progress.snapshot().await.map_err(|err| {
                warn!(error = %err, "failed to load daily progress");
                ViewError::Storage
            })?;
            Ok(map_calendar(&snapshot))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page home",
            section { class: "level-panel",
                div { class: "level-badge", "÷" }
                h2 { "Division" }
                div { class: "level-list",
                    for card in cards {
                        LevelButton { key: "{card.number}", card }
                    }
                }
            }
            aside { class: "calendar-panel",
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "muted", "Loading stamps..." }
                    },
                    ViewState::Ready(vm) => rsx! {
                        StampCalendar { vm }
                    },
                    ViewState::Error(err) => rsx! {
                        div { class: "error",
                            p { "{err.message()}" }
                            button { onclick: move |_| resource.restart(), "Retry" }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn LevelButton(card: LevelCardVm) -> Element {
    rsx! {
        Link { class: "level-button", to: Route::Game { level: card.number },
            span { class: "level-number {card.tone}", "{card.number}" }
            span { class: "level-title", "{card.title}" }
            span { class: "level-label", "{card.label}" }
            span { class: "level-arrow", "→" }
        }
    }
}
