// Session module - Command session and shadow state
pub mod session;
pub mod state;

pub use session::CommandSession;
pub use state::LedState;
