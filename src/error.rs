use thiserror::Error;

use crate::model::response::ResponseError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid age range: minimum {min} is greater than maximum {max}")]
    AgeRange { min: u8, max: u8 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid responses: {0}")]
    Response(#[from] ResponseError),
    #[error("record store: {0}")]
    Store(#[from] StoreError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("writing reports: {0}")]
    Report(#[from] std::io::Error),
}
