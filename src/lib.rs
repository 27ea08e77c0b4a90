pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod render;
pub mod ui;
pub mod weight;

pub use api::ApiClient;
pub use app::LiftTrackerApp;
pub use config::{Cli, Settings};
pub use controller::{Effect, Event, Page, ViewState};
pub use error::ApiError;
