use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResMapError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Export Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Empty Dataset: {0}")]
    EmptyDataset(String),

    #[error("Degenerate Weights: {0}")]
    DegenerateWeights(String),
}

pub type RmResult<T> = Result<T, ResMapError>;
