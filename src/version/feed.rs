//! Release feed lookup against the GitHub API
//!
//! Two-stage lookup: the "latest release" endpoint first, then the tag list
//! for repositories that tag versions without publishing releases. Every
//! transport failure (timeout, non-2xx, bad payload) is converted to absence
//! at this boundary and never propagated.

use reqwest::Url;
use serde::Deserialize;
use tracing::warn;

#[cfg(test)]
use mockall::automock;

use crate::config::{FETCH_TIMEOUT, GITHUB_API_BASE, GITHUB_HTML_BASE, TAGS_PER_PAGE};
use crate::version::error::FeedError;
use crate::version::semver::looks_like_semver;

/// Response from the GitHub "latest release" endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub html_url: String,
}

/// Entry in the GitHub tag list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Source of the most recent published version
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// Most recent published release, or `None` on any failure
    async fn latest_release(&self) -> Option<Release>;

    /// Most recent version tag, preferring semver-looking names, or `None`
    /// when the repository has no tags or the fetch fails
    async fn latest_tag(&self) -> Option<Tag>;

    /// Human-navigable URL for a tag
    fn tag_url(&self, tag_name: &str) -> String;
}

/// [`ReleaseFeed`] backed by the GitHub REST API
pub struct GitHubFeed {
    client: reqwest::Client,
    api_base: String,
    html_base: String,
    repo: String,
}

impl GitHubFeed {
    /// Creates a feed for `repo` (an `owner/name` slug) against api.github.com
    pub fn new(repo: &str) -> Self {
        Self::with_api_base(GITHUB_API_BASE, repo)
    }

    /// Creates a feed with a custom API base URL
    pub fn with_api_base(api_base: &str, repo: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("relcheck")
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            api_base: api_base.to_string(),
            html_base: GITHUB_HTML_BASE.to_string(),
            repo: repo.to_string(),
        }
    }

    async fn fetch_latest_release(&self) -> Result<Release, FeedError> {
        let url = format!("{}/repos/{}/releases/latest", self.api_base, self.repo);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::InvalidResponse(e.to_string()))
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>, FeedError> {
        let url = format!("{}/repos/{}/tags", self.api_base, self.repo);

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", TAGS_PER_PAGE)])
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ReleaseFeed for GitHubFeed {
    async fn latest_release(&self) -> Option<Release> {
        match self.fetch_latest_release().await {
            Ok(release) => Some(release),
            Err(e) => {
                warn!("Failed to fetch latest release for {}: {}", self.repo, e);
                None
            }
        }
    }

    async fn latest_tag(&self) -> Option<Tag> {
        let tags = match self.fetch_tags().await {
            Ok(tags) => tags,
            Err(e) => {
                warn!("Failed to fetch tags for {}: {}", self.repo, e);
                return None;
            }
        };

        // Prefer the first semver-looking tag; repositories that tag
        // non-release refs (e.g. "nightly") would otherwise shadow releases.
        tags.iter()
            .find(|tag| looks_like_semver(&tag.name))
            .or_else(|| tags.first())
            .cloned()
    }

    fn tag_url(&self, tag_name: &str) -> String {
        if let Ok(mut url) = Url::parse(&self.html_base) {
            let pushed = url
                .path_segments_mut()
                .map(|mut segments| {
                    segments
                        .extend(self.repo.split('/'))
                        .extend(["releases", "tag", tag_name]);
                })
                .is_ok();
            if pushed {
                return url.to_string();
            }
        }
        format!("{}/{}/releases/tag/{}", self.html_base, self.repo, tag_name)
    }
}
