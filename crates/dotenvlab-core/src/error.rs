use thiserror::Error;

#[derive(Error, Debug)]
pub enum DotenvlabError {
    // Platform errors
    #[error("PLATFORM_UNSUPPORTED: {0}")]
    PlatformUnsupported(String),

    // Package layout errors
    #[error("PACKAGE_DIR_UNAVAILABLE: {0}")]
    PackageDirUnavailable(String),

    // Invocation errors
    #[error("EXEC_FAILED: {0}")]
    ExecFailed(String),

    // State errors
    #[error("STATE_READ_ERROR: failed to read state.json: {0}")]
    StateReadError(String),

    #[error("STATE_WRITE_ERROR: failed to write state.json: {0}")]
    StateWriteError(String),

    #[error("STATE_INVALID_SCHEMA: unknown schema version '{0}'")]
    StateInvalidSchema(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for DotenvlabError {
    fn from(err: serde_json::Error) -> Self {
        DotenvlabError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DotenvlabError>;
