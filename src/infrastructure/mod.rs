// Infrastructure module - External dependencies and adapters
pub mod bluetooth;
pub mod config;
pub mod logging;
pub mod state;
