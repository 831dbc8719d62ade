//! Version-check layer for the running application
//!
//! Determines whether the running build is up to date against a GitHub
//! release feed, caching the answer so repeated checks do not hammer the
//! feed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Feed     │────▶│   Checker   │◀───▶│    Cache    │
//! │   (fetch)   │     │(orchestrate)│     │  (storage)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Semver    │
//!                     │ (compare)   │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: SQLite-backed store for the single check record, with TTL
//! - [`checker`]: check orchestration and status determination
//! - [`feed`]: release feed trait and GitHub implementation
//! - [`semver`]: tolerant semver parsing and comparison
//! - [`types`]: the [`types::VersionInfo`] record and its status enum
//! - [`error`]: error types for cache and feed operations

pub mod cache;
pub mod checker;
pub mod error;
pub mod feed;
pub mod semver;
pub mod types;

pub use cache::{SqliteStore, VersionStore};
pub use checker::VersionChecker;
pub use feed::{GitHubFeed, ReleaseFeed};
pub use types::{VersionInfo, VersionStatus};
