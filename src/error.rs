use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinancingError {
    #[error("down payment must be strictly less than the financed amount")]
    InvalidPrincipal,

    #[error("loan term cannot be zero months")]
    ZeroMonths,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FinancingError>;
