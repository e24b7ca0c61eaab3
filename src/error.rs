use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaterfallError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WaterfallError>;
