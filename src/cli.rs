use crate::platform::{Arch, Platform};
use clap::{Parser, Subcommand};

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("SETUP_AIR_GIT_TAG") {
        return tag;
    }

    // Not on a tag - include commit hash and branch (dev build)
    let commit = option_env!("SETUP_AIR_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("SETUP_AIR_GIT_BRANCH").unwrap_or("unknown");

    // Return a static string by leaking the formatted string
    // This is safe because it only happens once at startup
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser)]
#[command(name = "setup-air")]
#[command(about = "Installs the air CLI from GitHub Releases into a local tool cache")]
#[command(version = get_version())]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve, download, and cache a version of air; prints the install path
    Install {
        /// Version specifier: 'latest', an explicit version, or a range like '1.x'
        #[arg(long, default_value = "latest")]
        version: String,

        /// Target architecture (defaults to the host)
        #[arg(long)]
        arch: Option<Arch>,

        /// Target platform (defaults to the host)
        #[arg(long)]
        platform: Option<Platform>,

        /// GitHub token for release API and download authentication
        /// (defaults to $GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// Resolve a version specifier to a concrete release tag
    Resolve {
        /// Version specifier: 'latest', an explicit version, or a range like '1.x'
        #[arg(long, default_value = "latest")]
        version: String,

        /// GitHub token for release API authentication (defaults to $GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// List cached versions of air
    List {
        /// Architecture to list cache entries for (defaults to the host)
        #[arg(long)]
        arch: Option<Arch>,
    },

    /// Show the current version
    Version,
}
