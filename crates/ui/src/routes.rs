use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{GameView, HomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/game/:level", GameView)] Game { level: u8 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "masthead",
                Link { class: "masthead-title", to: Route::Home {},
                    "Division "
                    span { class: "accent", "Drill" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
