//! GitHub API interaction module
//!
//! Queries the posit-dev/air release listing: the latest release tag and the
//! full (paginated) set of release tags.

use crate::config::{APP_NAME, OWNER, REPO};
use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

const RELEASES_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("No releases found for {owner}/{repo}")]
    NoReleases { owner: String, repo: String },
    #[error("GitHub API request failed: {status} - {body}")]
    RequestFailed { status: StatusCode, body: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

/// Client for the release listing endpoints, authenticated with a
/// caller-supplied token (may be empty for anonymous requests).
pub struct ReleaseClient {
    http: reqwest::Client,
    token: String,
}

impl ReleaseClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", APP_NAME);

        if !self.token.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.token));
        }

        request
    }

    /// Tag of the most recently published release.
    pub async fn latest_release_tag(&self) -> Result<String> {
        let url = latest_release_url();
        tracing::debug!("Fetching latest release from: {}", url);

        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(ReleaseError::NoReleases {
                    owner: OWNER.to_string(),
                    repo: REPO.to_string(),
                }
                .into());
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ReleaseError::RequestFailed { status, body }.into());
        }

        let release: Release = response.json().await?;
        Ok(release.tag_name)
    }

    /// All release tags, walking the paginated listing. Tags come back in
    /// API order, most recent first.
    pub async fn release_tags(&self) -> Result<Vec<String>> {
        let mut tags = Vec::new();
        let mut page = 1;

        loop {
            let url = releases_url(page);
            tracing::debug!("Fetching release page from: {}", url);

            let response = self.get(&url).send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read error response".to_string());
                return Err(ReleaseError::RequestFailed { status, body }.into());
            }

            let releases: Vec<Release> = response.json().await?;
            let count = releases.len();
            tags.extend(releases.into_iter().map(|r| r.tag_name));

            if (count as u32) < RELEASES_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(tags)
    }
}

fn latest_release_url() -> String {
    format!(
        "https://api.github.com/repos/{}/{}/releases/latest",
        OWNER, REPO
    )
}

fn releases_url(page: u32) -> String {
    format!(
        "https://api.github.com/repos/{}/{}/releases?per_page={}&page={}",
        OWNER, REPO, RELEASES_PER_PAGE, page
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_release_url() {
        assert_eq!(
            latest_release_url(),
            "https://api.github.com/repos/posit-dev/air/releases/latest"
        );
    }

    #[test]
    fn test_releases_url_paginates() {
        assert_eq!(
            releases_url(1),
            "https://api.github.com/repos/posit-dev/air/releases?per_page=100&page=1"
        );
        assert_eq!(
            releases_url(3),
            "https://api.github.com/repos/posit-dev/air/releases?per_page=100&page=3"
        );
    }

    #[test]
    fn test_release_deserializes_tag_name() {
        let release: Release =
            serde_json::from_str(r#"{"tag_name": "1.5.2", "draft": false}"#).unwrap();
        assert_eq!(release.tag_name, "1.5.2");
    }
}
