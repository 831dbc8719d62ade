//! Tolerant semver parsing and comparison
//!
//! Release tags in the wild are not always clean semver: build tags like
//! `"main"` or suffixed tags like `"v1.2.3-rc.1"` show up in the feed.
//! Parsing only commits to the leading `major.minor.patch` groups and
//! comparison falls back to "no update" whenever a side is unparseable, so a
//! branch-named build can never trigger a false update notice.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

/// First three numeric groups of a version string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

fn semver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)").expect("valid semver pattern"))
}

/// Parse the leading `major.minor.patch` of a version string.
///
/// The input is trimmed and an optional leading `v` is stripped. Trailing
/// pre-release or build metadata is ignored. Returns `None` for anything
/// that does not start with three dot-separated numeric groups.
pub fn parse_version(version: &str) -> Option<ParsedVersion> {
    let captures = semver_pattern().captures(version.trim())?;

    let major = captures[1].parse().ok()?;
    let minor = captures[2].parse().ok()?;
    let patch = captures[3].parse().ok()?;

    Some(ParsedVersion {
        major,
        minor,
        patch,
    })
}

/// Compare two version strings, `current` relative to `latest`.
///
/// `Ordering::Less` means `latest` is newer. If either side fails to parse
/// the result is `Ordering::Equal`: an unparseable version must never signal
/// an update.
pub fn compare_versions(current: &str, latest: &str) -> Ordering {
    match (parse_version(current), parse_version(latest)) {
        (Some(current), Some(latest)) => (current.major, current.minor, current.patch).cmp(&(
            latest.major,
            latest.minor,
            latest.patch,
        )),
        _ => Ordering::Equal,
    }
}

/// Whether a tag name looks like a semver release tag
pub fn looks_like_semver(tag: &str) -> bool {
    semver_pattern().is_match(tag.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", Some(ParsedVersion { major: 1, minor: 2, patch: 3 }))]
    #[case("v1.2.3", Some(ParsedVersion { major: 1, minor: 2, patch: 3 }))]
    #[case("  v10.0.1  ", Some(ParsedVersion { major: 10, minor: 0, patch: 1 }))]
    #[case("1.2.3-rc.1+build5", Some(ParsedVersion { major: 1, minor: 2, patch: 3 }))]
    #[case("main", None)]
    #[case("1.2", None)]
    #[case("", None)]
    #[case("version-1.2.3", None)]
    fn parse_version_handles_common_shapes(
        #[case] input: &str,
        #[case] expected: Option<ParsedVersion>,
    ) {
        assert_eq!(parse_version(input), expected);
    }

    #[rstest]
    #[case("1.2.3", "1.2.4", Ordering::Less)]
    #[case("2.0.0", "1.9.9", Ordering::Greater)]
    #[case("v1.0.0", "1.0.0", Ordering::Equal)]
    #[case("1.0.0", "1.0.0", Ordering::Equal)]
    #[case("1.2.3", "1.3.0", Ordering::Less)]
    #[case("main", "1.0.0", Ordering::Equal)]
    #[case("1.0.0", "main", Ordering::Equal)]
    #[case("main", "dev", Ordering::Equal)]
    fn compare_versions_orders_by_major_minor_patch(
        #[case] current: &str,
        #[case] latest: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(current, latest), expected);
    }

    #[rstest]
    #[case("1.0.0", "2.0.0")]
    #[case("1.2.3", "1.2.4")]
    #[case("3.1.4", "3.1.4")]
    fn compare_versions_is_antisymmetric(#[case] a: &str, #[case] b: &str) {
        assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
        assert_eq!(compare_versions(a, a), Ordering::Equal);
    }

    #[rstest]
    #[case("v1.2.0", true)]
    #[case("1.2.0", true)]
    #[case("v1.2.0-beta", true)]
    #[case("nightly", false)]
    #[case("v1.2", false)]
    fn looks_like_semver_matches_release_tags(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(looks_like_semver(tag), expected);
    }
}
