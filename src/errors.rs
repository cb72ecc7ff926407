use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeuralError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message store error: {0}")]
    Store(String),

    #[error("A simulated response is already in flight")]
    Busy,

    #[error("Event channel closed")]
    ChannelClosed,
}

impl NeuralError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        NeuralError::Config(msg.into())
    }

    pub fn store_error(msg: impl Into<String>) -> Self {
        NeuralError::Store(msg.into())
    }
}

pub type NeuralResult<T> = Result<T, NeuralError>;
