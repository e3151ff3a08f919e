pub mod aggregates;
pub mod app;
pub mod carousel;
pub mod client;
pub mod config;
pub mod errors;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod ui;
pub mod weekday;

pub use app::router;
pub use client::{HttpStatsClient, StatsSource};
pub use config::Config;
pub use session::Session;
pub use state::AppState;
