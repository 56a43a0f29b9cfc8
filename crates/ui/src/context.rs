use std::sync::Arc;

use drill_core::model::{DrillSettings, Variant};
use services::{DrillService, ProgressService};

/// What the UI needs from the application composition root.
pub trait UiApp: Send + Sync {
    fn settings(&self) -> DrillSettings;

    fn drill(&self) -> Arc<DrillService>;
    fn progress(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    settings: DrillSettings,
    drill: Arc<DrillService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            settings: app.settings(),
            drill: app.drill(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.settings.variant()
    }

    #[must_use]
    pub fn daily_goal(&self) -> u32 {
        self.settings.daily_goal()
    }

    #[must_use]
    pub fn drill(&self) -> Arc<DrillService> {
        Arc::clone(&self.drill)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
