use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("{date} is in the past (today is {today}); past days are read-only")]
    PastDate { date: String, today: String },
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
