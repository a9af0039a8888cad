//! Core type system and error handling for strmforge
//!
//! This crate provides the foundational types shared by every strmforge
//! component:
//!
//! - **Error handling**: structured error taxonomy with per-file, per-root
//!   and per-phase isolation semantics
//! - **Core types**: file classification, proxy generation outcomes and run
//!   statistics
//!
//! # Examples
//!
//! ```rust
//! use strmforge_types::{FileCategory, Result, SyncStats};
//!
//! fn example_operation() -> Result<SyncStats> {
//!     let mut stats = SyncStats::new();
//!     stats.proxies_created = 10;
//!     Ok(stats)
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod result;
pub mod types;

pub use error::{Error, ErrorKind};
pub use result::Result;
pub use types::{FileCategory, ProxyOutcome, SyncStats};
