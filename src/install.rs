//! Resolution and installation flow
//!
//! Resolving a version specifier to a release tag, checking the tool cache,
//! and on a miss downloading, extracting, and caching the release artifact.

use crate::config::{OWNER, REPO, TOOL_CACHE_NAME};
use crate::download::{download_file, extract_tar_gz, extract_zip};
use crate::github::ReleaseClient;
use crate::platform::{archive_ext, artifact_name, Arch, Platform};
use crate::tool_cache::{evaluate_versions, is_explicit_version, ToolCache};
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("No release satisfies version specifier '{0}'")]
pub struct NoMatchingVersion(pub String);

/// Resolve a version specifier to a concrete release tag.
///
/// "latest" asks the release host for the newest tag; explicit versions pass
/// through unchanged without any release listing query; anything else is
/// matched as a semver range against all release tags.
pub async fn resolve_version(spec: &str, token: &str) -> Result<String> {
    tracing::debug!("Resolving version specifier '{}'...", spec);

    let client = ReleaseClient::new(token);
    let version = if spec == "latest" {
        client.latest_release_tag().await?
    } else {
        spec.to_string()
    };

    if is_explicit_version(&version) {
        tracing::debug!("Version {} is an explicit version", version);
        return Ok(version);
    }

    let available = client.release_tags().await?;
    let resolved =
        evaluate_versions(&available, &version).ok_or(NoMatchingVersion(version))?;
    tracing::debug!("Resolved version: {}", resolved);
    Ok(resolved)
}

/// Check the tool cache for a version satisfying the specifier.
///
/// Returns the best cached match, or the literal specifier when nothing
/// cached satisfies it; the path is `None` on a miss. Read-only.
pub fn try_get_from_tool_cache(
    cache: &ToolCache,
    arch: Arch,
    version: &str,
) -> (String, Option<PathBuf>) {
    tracing::debug!("Trying to get air from tool cache for {}...", version);
    let cached_versions = cache.find_all_versions(TOOL_CACHE_NAME, arch);
    tracing::debug!("Cached versions: {:?}", cached_versions);

    let resolved = evaluate_versions(&cached_versions, version)
        .unwrap_or_else(|| version.to_string());
    let installed_path = cache.find(TOOL_CACHE_NAME, &resolved, arch);

    (resolved, installed_path)
}

/// Release artifact URL for an explicit version and target.
pub fn download_url(platform: Platform, arch: Arch, version: &str) -> String {
    format!(
        "https://github.com/{}/{}/releases/download/{}/{}{}",
        OWNER,
        REPO,
        version,
        artifact_name(arch, platform),
        archive_ext(platform)
    )
}

/// Download, extract, and cache an explicit version. Returns the final tool
/// cache directory.
pub async fn download_version(
    cache: &ToolCache,
    platform: Platform,
    arch: Arch,
    version: &str,
    token: &str,
) -> Result<PathBuf> {
    let artifact = artifact_name(arch, platform);
    let ext = archive_ext(platform);
    let url = download_url(platform, arch, version);
    tracing::info!("Downloading air from \"{}\" ...", url);

    // Name the download with its real extension so format dispatch is by
    // suffix, matching how the archives are published.
    let download_dir = TempDir::new()?;
    let archive_path = download_dir.path().join(format!("{}{}", artifact, ext));
    download_file(&url, &archive_path, token).await?;

    let staging_dir = TempDir::new()?;
    let tool_dir = if platform == Platform::PcWindowsMsvc {
        // Windows zips place the binary at the archive root
        extract_zip(&archive_path, staging_dir.path())?;
        staging_dir.path().to_path_buf()
    } else {
        // Tarballs nest everything under a directory named after the artifact
        extract_tar_gz(&archive_path, staging_dir.path())?;
        staging_dir.path().join(&artifact)
    };

    let cached_tool_dir = cache.cache_dir(&tool_dir, TOOL_CACHE_NAME, version, arch)?;
    Ok(cached_tool_dir)
}
