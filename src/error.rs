use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Place search provider error: {0}")]
    Provider(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A newer search started while this one was in flight. Callers should
    /// drop this result silently instead of showing it as a failure.
    #[error("Search superseded by a newer query")]
    StaleSearch,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
