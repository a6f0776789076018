use anyhow::Result;
use std::path::PathBuf;

pub const APP_NAME: &str = "setup-air";

/// Owner and repository the releases are pulled from.
pub const OWNER: &str = "posit-dev";
pub const REPO: &str = "air";

/// Name the tool is indexed under in the tool cache.
pub const TOOL_CACHE_NAME: &str = "air";

/// Resolve the tool cache root directory.
///
/// `AIR_TOOL_CACHE` takes precedence, then `RUNNER_TOOL_CACHE` (set by CI
/// runners), then a per-user cache directory.
pub fn tool_cache_root() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("AIR_TOOL_CACHE") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    if let Ok(dir) = std::env::var("RUNNER_TOOL_CACHE") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let path = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
        .join(APP_NAME);
    tracing::debug!("Tool cache root: {}", path.display());
    Ok(path)
}
