pub mod api;
pub mod config;
pub mod log_browser;
pub mod model;
pub mod repl;
pub mod session;
pub mod ui;
