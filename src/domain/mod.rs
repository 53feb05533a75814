// Domain module - Core domain types
pub mod config;
pub mod error;

pub use config::LedComConfig;
pub use error::{LedComError, LedComResult};
