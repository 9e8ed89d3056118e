use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure failures.
///
/// A semantically broken state machine is not an error: it still produces diagram text, with a
/// [`crate::Notice`] in place of the body.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid state machine model: {message}")]
    InvalidModel { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    JsonFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {message}")]
    Config { message: String },
}
