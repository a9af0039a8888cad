//! Synchronization core for strmforge
//!
//! This crate implements the per-run machinery that mirrors a media source
//! tree into a lightweight proxy tree:
//!
//! - **Sanitizer**: maps arbitrary path segments to filesystem-safe segments
//! - **Classifier**: decides video / image / other / ignored by extension
//! - **SnapshotIndex**: shadow tree of zero-byte markers that makes proxy
//!   generation idempotent across runs
//! - **ProxyGenerator**: writes one pointer file plus its snapshot marker
//! - **TreeWalker**: walks one source root, processing only leaf directories
//! - **RunLock**: marker file recording a completed synchronization cycle
//!
//! # Examples
//!
//! ```rust
//! use strmforge_sync::sanitize;
//!
//! assert_eq!(sanitize("Who? Am: I"), "Who_ Am_ I");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod lock;
pub mod platform;
pub mod proxy;
pub mod sanitize;
pub mod snapshot;
pub mod walker;

pub use classify::Classifier;
pub use lock::RunLock;
pub use proxy::{ProxyGenerator, PROXY_EXTENSION};
pub use sanitize::{sanitize, sanitize_relative};
pub use snapshot::SnapshotIndex;
pub use walker::TreeWalker;
