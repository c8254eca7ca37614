use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Packes
#[derive(Error, Debug)]
pub enum PackError {
    #[error("input should not equal to output: {path}")]
    SameInputOutput { path: PathBuf },

    #[error("{path} does not exist")]
    EntryNotFound { path: PathBuf },

    #[error("Invalid alias entry '{entry}': expected name=path")]
    InvalidAlias { entry: String },

    #[error("Failed to launch bundler '{program}'")]
    BundlerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Bundler reported {} error(s)", .errors.len())]
    BuildFailed { errors: Vec<String> },

    #[error("File system error: {message}")]
    FileSystemError {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid statement pattern")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PackError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCategory {
    Precondition,
    Configuration,
    Bundle,
    FileSystem,
    Internal,
}

impl PackError {
    pub fn file_system_error(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Errors raised before any scratch file is written or the bundler runs
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::SameInputOutput { .. } | Self::EntryNotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SameInputOutput { .. } | Self::EntryNotFound { .. } => ErrorCategory::Precondition,
            Self::InvalidAlias { .. } => ErrorCategory::Configuration,
            Self::BundlerLaunch { .. } | Self::BuildFailed { .. } => ErrorCategory::Bundle,
            Self::FileSystemError { .. } => ErrorCategory::FileSystem,
            Self::Pattern(_) => ErrorCategory::Internal,
        }
    }
}

impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystemError {
            message: err.to_string(),
            path: PathBuf::new(),
            source: err,
        }
    }
}
