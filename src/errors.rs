use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("{0} is not a supported type for 'comparePasswordType'")]
    UnsupportedCompareType(String),

    #[error("{0} is not a supported type for 'hashAlgorithm'")]
    UnsupportedAlgorithm(String),

    #[error("Invalid field path: {0}")]
    InvalidFieldPath(String),

    #[error("Invalid cost {cost}: must be between {min} and {max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },

    #[error("Salt generation error: {0}")]
    Salt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Compare error: {0}")]
    Compare(String),

    #[error("Field not found: {0}")]
    MissingField(String),

    #[error("Field is not a string: {0}")]
    FieldNotString(String),

    #[error("Path conflict: {0}")]
    PathConflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Task join error: {0}")]
    Join(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for PasswordError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Join(e.to_string())
    }
}
