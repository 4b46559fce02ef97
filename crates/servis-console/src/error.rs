use servis_client::{ApiError, ConfigError};

use crate::navigation::Route;
use crate::table::TableError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("oturum gerekli: önce `servis login` çalıştırın ({})", .0.path())]
    Unauthenticated(Route),

    #[error("geçersiz filtre {0:?}: sütun=değer biçiminde olmalı")]
    Filter(String),

    /// The action ran but reported failure through its notifications.
    #[error("işlem tamamlanamadı")]
    ActionFailed,
}
