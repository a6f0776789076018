//! Local tool cache
//!
//! Installed tool versions are indexed on disk as
//! `<root>/<tool>/<version>/<arch>/`, with a sibling `<arch>.complete` marker
//! written after the copy finishes. An entry without its marker is treated as
//! absent.

use crate::platform::Arch;
use anyhow::{Context, Result};
use semver::{Version, VersionReq};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(crate::config::tool_cache_root()?))
    }

    /// All completely cached versions of a tool for an architecture, sorted
    /// ascending by semver. Directory names that are not explicit versions
    /// are not part of the index.
    pub fn find_all_versions(&self, tool: &str, arch: Arch) -> Vec<String> {
        let tool_dir = self.root.join(tool);
        let mut versions: Vec<(Version, String)> = Vec::new();

        let entries = match fs::read_dir(&tool_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let raw = entry.file_name().to_string_lossy().to_string();
            let parsed = match parse_version(&raw) {
                Some(parsed) => parsed,
                None => continue,
            };
            if self.find(tool, &raw, arch).is_some() {
                versions.push((parsed, raw));
            }
        }

        versions.sort_by(|(a, _), (b, _)| a.cmp(b));
        versions.into_iter().map(|(_, raw)| raw).collect()
    }

    /// Look up an explicit version. `None` signals a cache miss.
    pub fn find(&self, tool: &str, version: &str, arch: Arch) -> Option<PathBuf> {
        let version_dir = self.root.join(tool).join(version);
        let install_dir = version_dir.join(arch.as_str());
        let marker = version_dir.join(format!("{}.complete", arch));

        if install_dir.is_dir() && marker.is_file() {
            tracing::debug!("Cache hit: {}", install_dir.display());
            Some(install_dir)
        } else {
            None
        }
    }

    /// Copy a directory tree into the cache under (tool, version, arch) and
    /// mark it complete. Replaces any previous entry for the same key.
    pub fn cache_dir(
        &self,
        source_dir: &Path,
        tool: &str,
        version: &str,
        arch: Arch,
    ) -> Result<PathBuf> {
        let version_dir = self.root.join(tool).join(version);
        let install_dir = version_dir.join(arch.as_str());
        let marker = version_dir.join(format!("{}.complete", arch));

        if marker.exists() {
            fs::remove_file(&marker)?;
        }
        if install_dir.exists() {
            fs::remove_dir_all(&install_dir)?;
        }
        fs::create_dir_all(&install_dir)?;

        copy_dir_recursive(source_dir, &install_dir)?;

        // Marker goes in last so interrupted copies stay invisible
        fs::write(&marker, "")?;

        tracing::info!(
            "Cached {} {} ({}) at {}",
            tool,
            version,
            arch,
            install_dir.display()
        );
        Ok(install_dir)
    }
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("Path outside source tree: {}", entry.path().display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_symlink() {
            let link = fs::read_link(entry.path())?;
            #[cfg(unix)]
            std::os::unix::fs::symlink(&link, &target)?;
            #[cfg(not(unix))]
            fs::copy(entry.path(), &target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn parse_version(version: &str) -> Option<Version> {
    Version::parse(version.trim_start_matches('v')).ok()
}

/// Interpret a version specifier the way release tooling does: an explicit
/// version matches only itself, and a bare `1` or `1.2` means `1.*` / `1.2.*`.
/// The semver crate's bare-version default is the Cargo caret, which would
/// let `1.0.0` match any `1.x` release.
fn parse_spec(spec: &str) -> Option<VersionReq> {
    let spec = spec.trim_start_matches('v');

    if Version::parse(spec).is_ok() {
        return VersionReq::parse(&format!("={}", spec)).ok();
    }

    let parts: Vec<&str> = spec.split('.').collect();
    let all_numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    if all_numeric && parts.len() <= 2 {
        return VersionReq::parse(&format!("{}.*", spec)).ok();
    }

    VersionReq::parse(spec).ok()
}

/// Pick the highest version satisfying a semver range specifier. `None` when
/// nothing satisfies the range or the specifier does not parse.
pub fn evaluate_versions(versions: &[String], spec: &str) -> Option<String> {
    let req = parse_spec(spec)?;

    versions
        .iter()
        .filter_map(|raw| parse_version(raw).map(|parsed| (parsed, raw)))
        .filter(|(parsed, _)| req.matches(parsed))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, raw)| raw.clone())
}

/// Whether a specifier is a concrete version rather than a range or alias.
pub fn is_explicit_version(spec: &str) -> bool {
    Version::parse(spec.trim_start_matches('v')).is_ok()
}
