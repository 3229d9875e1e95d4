use thiserror::Error;

use earnlens_core::{
    AlignmentMismatchError, CoreError, DataFormatError, FeedError, InsufficientDataError,
    RangeError, ValidationError,
};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Analysis(#[from] CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Feed(_) => 3,
            Self::Serialization(_) => 4,
            Self::Analysis(_) => 5,
            Self::Io(_) => 10,
        }
    }
}

impl From<DataFormatError> for CliError {
    fn from(error: DataFormatError) -> Self {
        Self::Analysis(CoreError::DataFormat(error))
    }
}

impl From<AlignmentMismatchError> for CliError {
    fn from(error: AlignmentMismatchError) -> Self {
        Self::Analysis(CoreError::AlignmentMismatch(error))
    }
}

impl From<InsufficientDataError> for CliError {
    fn from(error: InsufficientDataError) -> Self {
        Self::Analysis(CoreError::InsufficientData(error))
    }
}

impl From<RangeError> for CliError {
    fn from(error: RangeError) -> Self {
        Self::Analysis(CoreError::Range(error))
    }
}
