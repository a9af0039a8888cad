//! Error types and handling for strmforge
//!
//! The taxonomy mirrors how failures propagate during a run: traversal and
//! generation errors are isolated to one root or one file, transport errors
//! are fatal for a single backup/restore phase, and configuration errors are
//! fatal at startup.

use std::path::PathBuf;

/// Main error type for strmforge operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// One source root could not be traversed
    #[error("Traversal error for '{path}': {message}")]
    Traversal {
        /// Root that failed to traverse
        path: PathBuf,
        /// Error message describing the traversal failure
        message: String,
    },

    /// Proxy generation failed for one file
    #[error("Generation error for '{path}': {message}")]
    Generation {
        /// File that failed to generate
        path: PathBuf,
        /// Error message describing the generation failure
        message: String,
    },

    /// Remote transport invocation failed
    #[error("Transport error: {message}")]
    Transport {
        /// Error message describing the transport failure
        message: String,
    },

    /// Archive compression or extraction failed
    #[error("Archive error: {message}")]
    Archive {
        /// Error message describing the archive failure
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Configuration errors
    Config,
    /// Traversal errors
    Traversal,
    /// Generation errors
    Generation,
    /// Transport errors
    Transport,
    /// Archive errors
    Archive,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
            Self::Traversal { .. } => ErrorKind::Traversal,
            Self::Generation { .. } => ErrorKind::Generation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Archive { .. } => ErrorKind::Archive,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Check whether this error ends the phase that produced it
    ///
    /// Traversal and generation errors are isolated to one root or one file
    /// and never abort sibling work. Transport and configuration errors are
    /// fatal for their phase.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Traversal { .. } | Self::Generation { .. } => false,
            Self::Config { .. } | Self::Transport { .. } => true,
            Self::Io { .. } | Self::Archive { .. } | Self::Other { .. } => false,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new traversal error
    pub fn traversal<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Traversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Generation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new archive error
    pub fn archive<S: Into<String>>(message: S) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
