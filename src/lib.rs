pub mod admin;
pub mod api;
pub mod app;
pub mod booking;
pub mod config;
pub mod dates;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod recurrence;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
