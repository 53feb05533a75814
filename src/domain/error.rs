use thiserror::Error;

/// LedCom unified error type
#[derive(Error, Debug)]
pub enum LedComError {
    #[error("Bluetooth adapter unavailable")]
    AdapterUnavailable,

    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection attempt timed out")]
    Timeout,

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type LedComResult<T> = Result<T, LedComError>;
