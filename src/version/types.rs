//! The check record returned to callers and persisted in the cache

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a check record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionStatus {
    /// A check is in progress and has not resolved yet
    Checking,
    /// The running build is the latest published version
    Latest,
    /// A newer version was found on the release feed
    UpdateAvailable,
    /// The check could not be completed
    Error,
}

/// Result of an update check
///
/// The same shape is persisted in the cache and returned to callers.
/// Callers receive a value, never a live handle: a returned record is not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Version identifier of the running build, fixed at process start
    pub current_version: String,
    /// Most recent version discovered remotely, once fetched
    pub latest_version: Option<String>,
    pub is_latest: bool,
    pub has_update: bool,
    /// Human-navigable link to the discovered release or tag
    pub release_url: Option<String>,
    /// Epoch milliseconds at which this record was produced
    pub last_check_time: i64,
    pub status: VersionStatus,
}

impl VersionInfo {
    /// Fresh unresolved record for a check that missed the cache
    pub fn checking(current_version: &str) -> Self {
        Self {
            current_version: current_version.to_string(),
            latest_version: None,
            is_latest: false,
            has_update: false,
            release_url: None,
            last_check_time: current_timestamp_ms(),
            status: VersionStatus::Checking,
        }
    }

    /// Fill in the outcome of a completed comparison
    ///
    /// `comparison` is current relative to latest: `Less` means a newer
    /// version exists. `is_latest` and `has_update` stay mutually exclusive.
    pub fn resolve(&mut self, latest_version: String, release_url: String, comparison: Ordering) {
        self.latest_version = Some(latest_version);
        self.release_url = Some(release_url);
        self.has_update = comparison == Ordering::Less;
        self.is_latest = !self.has_update;
        self.status = if self.has_update {
            VersionStatus::UpdateAvailable
        } else {
            VersionStatus::Latest
        };
    }
}

/// Current timestamp in milliseconds since UNIX epoch
pub fn current_timestamp_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time before UNIX epoch")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Ordering::Less, true, false, VersionStatus::UpdateAvailable)]
    #[case(Ordering::Equal, false, true, VersionStatus::Latest)]
    #[case(Ordering::Greater, false, true, VersionStatus::Latest)]
    fn resolve_sets_mutually_exclusive_flags(
        #[case] comparison: Ordering,
        #[case] has_update: bool,
        #[case] is_latest: bool,
        #[case] status: VersionStatus,
    ) {
        let mut info = VersionInfo::checking("1.0.0");
        info.resolve("v1.2.0".to_string(), "https://example.com".to_string(), comparison);

        assert_eq!(info.has_update, has_update);
        assert_eq!(info.is_latest, is_latest);
        assert_eq!(info.status, status);
        assert_eq!(info.latest_version.as_deref(), Some("v1.2.0"));
    }

    #[test]
    fn serializes_with_camel_case_fields_and_kebab_case_status() {
        let mut info = VersionInfo::checking("1.0.0");
        info.resolve("v2.0.0".to_string(), "https://example.com".to_string(), Ordering::Less);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["currentVersion"], "1.0.0");
        assert_eq!(json["latestVersion"], "v2.0.0");
        assert_eq!(json["hasUpdate"], true);
        assert_eq!(json["isLatest"], false);
        assert_eq!(json["status"], "update-available");
        assert!(json["lastCheckTime"].is_i64());
    }
}
