//! Error types for the shim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dispatch(#[from] ormshim_dispatch::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
