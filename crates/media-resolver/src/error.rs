use thiserror::Error;

/// Why a link could not be resolved. Every variant is reported to the user the same way.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Resolver request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Resolver returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Resolver response is missing `{0}`")]
    MissingField(&'static str),
}

/// Why a size probe produced no usable length. Logged, never shown to the user.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HEAD request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HEAD returned HTTP {0}")]
    Status(u16),

    #[error("Content-Length header missing")]
    MissingLength,

    #[error("Content-Length is not a number: {0}")]
    InvalidLength(String),
}
