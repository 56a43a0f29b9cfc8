#![forbid(unsafe_code)]

pub mod app_services;
pub mod drill_service;
pub mod error;
pub mod progress_service;
pub mod rng;
pub mod settings_service;

pub use drill_core::Clock;

pub use app_services::AppServices;
pub use drill_service::{DrillService, SubmitReport};
pub use error::{AppServicesError, DrillError, ProgressServiceError, SettingsServiceError};
pub use progress_service::{ProgressService, SNAPSHOT_WINDOW_DAYS};
pub use rng::{RngSource, SharedRandom};
pub use settings_service::SettingsService;
