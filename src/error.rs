use thiserror::Error;

/// Errors raised by the segmentation models and their corpus drivers.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// A transition probability was asked for with a denominator that has never been counted
    #[error("Unseen denominator: {0} has no prior occurrences")]
    UnseenDenominator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] json::Error),
}

pub type SegmentResult<T> = Result<T, SegmentError>;

impl SegmentError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }
}
