pub mod app;
pub mod auth;
pub mod charts;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use controller::Controller;
pub use state::AppState;
pub use storage::Profile;
