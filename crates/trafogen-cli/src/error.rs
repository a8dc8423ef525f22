use std::path::PathBuf;
use thiserror::Error;
use trafogen::core::catalog::CatalogError;
use trafogen::engine::error::EngineError;
use trafogen::workflows::ConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("sweep aborted before completion")]
    Aborted,

    #[error("Failed to write results to '{path}': {source}", path = path.display())]
    ResultWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
