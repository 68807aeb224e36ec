pub mod app;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod report;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use storage::{Backend, ConfigStore, EntryStore};
