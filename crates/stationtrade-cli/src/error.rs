use stationtrade_core::{CatalogError, CoreError, LedgerError, TrackError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Startup(#[from] CoreError),

    #[error("failed to load item catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to load ledger: {0}")]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Track(TrackError::EmptyQuery) => 2,
            Self::Track(TrackError::UnknownItem { .. })
            | Self::Track(TrackError::MarketDataNotFound { .. }) => 3,
            Self::Serialization(_) => 4,
            Self::Track(TrackError::Ledger(_))
            | Self::Startup(_)
            | Self::Catalog(_)
            | Self::Ledger(_)
            | Self::Io(_) => 10,
        }
    }
}
