#[derive(Debug, thiserror::Error)]
pub enum BrainError {
    #[error("api error: {0}")]
    Api(String),

    #[error("rate limited")]
    RateLimited,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("memory io error: {0}")]
    Io(String),

    #[error("memory parse error: {0}")]
    Parse(String),
}
