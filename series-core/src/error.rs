use series_contracts::StorageError;
use series_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("no preference store has been installed")]
    PreferencesNotInstalled,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid page input: {0}")]
    Model(#[from] ModelError),

    #[error("failed to read page document: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PageError>;
