use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Status database error: {0}")]
    Database(String),

    #[error("Presence record without account id")]
    MissingAccountId,
}
