//! Application-wide error types.
//!
//! Library modules (`cover`, `metadata`, `config`) return [`Error`] via
//! `thiserror`, while CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use mp3pic::error::{Result, ResultExt};
//!
//! fn load(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path).with_context(format!("reading {}", path.display()))
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source image bytes could not be interpreted as a supported image
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Requested artwork format is not JPEG or PNG
    #[error("Unsupported artwork format: {0}")]
    UnsupportedFormat(String),

    /// Encoding the canvas failed
    #[error("Could not encode artwork: {0}")]
    Encode(#[source] image::ImageError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag reading/writing error
    #[error("Tag error for {path}: {source}")]
    Tag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// File not found
    #[error("Cannot find '{0}'")]
    NotFound(PathBuf),

    /// Bad command-line input (wrong extension and similar)
    #[error("{0}")]
    InvalidInput(String),

    /// Refusing to replace an existing output file
    #[error("Cannot overwrite: '{0}'")]
    OutputExists(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a tag error.
    pub fn tag(path: impl Into<PathBuf>, source: lofty::error::LoftyError) -> Self {
        Self::Tag {
            path: path.into(),
            source,
        }
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
