pub mod app_state;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod pv_watcher;
pub mod scheduler;

pub use pv_watcher::PvWatcher;
