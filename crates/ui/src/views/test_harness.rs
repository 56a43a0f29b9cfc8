use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use drill_core::ScriptedSource;
use drill_core::model::{DrillSettings, DrillSettingsDraft};
use drill_core::time::fixed_now;
use services::{AppServices, Clock, DrillService, ProgressService, SharedRandom};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{GameView, HomeView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn settings(&self) -> DrillSettings {
        self.services.settings()
    }

    fn drill(&self) -> Arc<DrillService> {
        self.services.drill()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Game(u8),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Game(level) => rsx! { GameView { level } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a harness over `storage`, drawing random values from `script`.
pub async fn setup_view_harness(view: ViewKind, storage: Storage, script: &[u32]) -> ViewHarness {
    let services = AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        SharedRandom::new(ScriptedSource::new(script.iter().copied())),
        DrillSettingsDraft::default(),
    )
    .await
    .expect("services");

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );
    ViewHarness { dom }
}
