use thiserror::Error;

/// Terminal failure of a token source. Once one is reported the source yields nothing more.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}
