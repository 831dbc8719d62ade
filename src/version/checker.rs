//! Update-check orchestration
//!
//! A check consults the cache first and only goes to the release feed on a
//! miss, falling back from the release endpoint to the tag list. The
//! contract with callers: `check_for_updates` always returns a record and
//! never fails, resolving every failure mode into `status = error` at worst.

use tracing::debug;

use crate::version::cache::VersionStore;
use crate::version::feed::ReleaseFeed;
use crate::version::semver::compare_versions;
use crate::version::types::{VersionInfo, VersionStatus};

/// Cached update checker
///
/// Constructed once at application start and passed by handle to consumers.
/// Overlapping calls are not serialized: both will read and write the store
/// independently and the last writer wins. Callers that need single-flight
/// behavior must serialize externally.
pub struct VersionChecker<S, F> {
    current_version: String,
    store: S,
    feed: F,
}

impl<S: VersionStore, F: ReleaseFeed> VersionChecker<S, F> {
    pub fn new(current_version: &str, store: S, feed: F) -> Self {
        Self {
            current_version: current_version.to_string(),
            store,
            feed,
        }
    }

    /// Check whether a newer version has been published.
    ///
    /// Serves a cached record when one is still valid; otherwise fetches
    /// from the feed, persists the resolved record, and returns it. Error
    /// records are returned but never persisted, so a failed check retries
    /// on the next call.
    pub async fn check_for_updates(&self) -> VersionInfo {
        if let Some(cached) = self.store.load(&self.current_version) {
            debug!("Serving cached version info");
            return cached;
        }

        let mut info = VersionInfo::checking(&self.current_version);

        if let Some(release) = self.feed.latest_release().await {
            let comparison = compare_versions(&self.current_version, &release.tag_name);
            info.resolve(release.tag_name, release.html_url, comparison);
            self.store.store(&info);
            return info;
        }

        if let Some(tag) = self.feed.latest_tag().await {
            let comparison = compare_versions(&self.current_version, &tag.name);
            let release_url = self.feed.tag_url(&tag.name);
            info.resolve(tag.name, release_url, comparison);
            self.store.store(&info);
            return info;
        }

        info.status = VersionStatus::Error;
        info
    }

    /// Version identifier of the running build
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Drop the cached record so the next check hits the feed
    pub fn clear_cache(&self) {
        self.store.clear();
    }
}
