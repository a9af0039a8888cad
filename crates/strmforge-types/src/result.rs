//! Result type alias for strmforge operations

use crate::Error;

/// Result type alias for strmforge operations
pub type Result<T> = std::result::Result<T, Error>;
