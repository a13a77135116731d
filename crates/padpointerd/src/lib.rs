pub mod api;
pub mod app;
pub mod host;
pub mod logging;
pub mod runner;
