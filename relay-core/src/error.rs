use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Placeholder message id missing")]
    MissingPlaceholder,
}

impl RelayError {
    /// Error text without the variant prefix, for messages shown in chat.
    pub fn detail(&self) -> String {
        match self {
            RelayError::Bot(msg) | RelayError::Config(msg) => msg.clone(),
            RelayError::Handler(e) => e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
