//! Run orchestration for strmforge
//!
//! This crate ties the lower layers together into full run cycles:
//!
//! - **Orchestrator**: bounded fan-out of tree walkers across all
//!   configured source roots with merged statistics
//! - **Engine**: restore, lock check, flush, lock write and backup
//!   sequencing for one process lifetime
//! - **Watcher**: standalone filesystem event publisher for source trees
//!
//! # Examples
//!
//! ```rust,no_run
//! use strmforge_engine::SyncEngine;
//! use strmforge_config::Profile;
//!
//! # async fn example() -> strmforge_types::Result<()> {
//! let engine = SyncEngine::new(Profile::default());
//! if let Some(stats) = engine.run().await? {
//!     println!("created {} proxies", stats.proxies_created);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod orchestrator;
pub mod watcher;

pub use engine::SyncEngine;
pub use orchestrator::{SyncOrchestrator, DEFAULT_CONCURRENCY};
pub use watcher::{SourceWatcher, WatchEvent};
