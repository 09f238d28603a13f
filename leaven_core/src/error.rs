use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LeavenError {
    #[error("invalid calibration table: {0}")]
    InvalidTable(String),
    #[error("favorite name must not be empty")]
    EmptyFavoriteName,
    #[error("no favorite with id {0}")]
    UnknownFavorite(u64),
    #[error("favorite ids exhausted")]
    FavoriteIdsExhausted,
    #[error("invalid favorites: {0}")]
    InvalidFavorites(String),
    #[error("unknown temperature unit {0:?} (expected C or F)")]
    InvalidTemperatureUnit(String),
    #[error("rise target must be 75 or 100, got {0}")]
    InvalidRiseTarget(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
