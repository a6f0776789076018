mod cli;
mod config;
mod download;
mod github;
mod install;
mod platform;
mod tool_cache;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::TOOL_CACHE_NAME;
use install::{download_version, resolve_version, try_get_from_tool_cache};
use platform::{host_target, Arch, Platform};
use tool_cache::ToolCache;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(&cli)?;

    match cli.command {
        Commands::Version => {
            println!("setup-air v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::List { arch } => {
            let arch = resolve_arch(arch)?;
            let cache = ToolCache::from_env()?;
            for version in cache.find_all_versions(TOOL_CACHE_NAME, arch) {
                println!("{}", version);
            }
        }

        Commands::Resolve { version, token } => {
            let token = resolve_token(token);
            let resolved = resolve_version(&version, &token).await?;
            println!("{}", resolved);
        }

        Commands::Install {
            version,
            arch,
            platform,
            token,
        } => {
            let token = resolve_token(token);
            let arch = resolve_arch(arch)?;
            let platform = resolve_platform(platform)?;
            let cache = ToolCache::from_env()?;

            // The raw specifier may already match a cached version
            let (cached_version, installed_path) =
                try_get_from_tool_cache(&cache, arch, &version);
            if let Some(path) = installed_path {
                tracing::info!("Found air {} in tool cache", cached_version);
                println!("{}", path.display());
                return Ok(());
            }

            let resolved = resolve_version(&version, &token).await?;
            if let Some(path) = cache.find(TOOL_CACHE_NAME, &resolved, arch) {
                tracing::info!("Found air {} in tool cache", resolved);
                println!("{}", path.display());
                return Ok(());
            }

            let install_dir = download_version(&cache, platform, arch, &resolved, &token).await?;
            tracing::info!(
                "Installed air {} to {}",
                resolved,
                install_dir.display()
            );
            println!("{}", install_dir.display());
        }
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn resolve_token(token: Option<String>) -> String {
    token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .unwrap_or_default()
}

fn resolve_arch(arch: Option<Arch>) -> Result<Arch> {
    match arch {
        Some(arch) => Ok(arch),
        None => Ok(host_target()?.0),
    }
}

fn resolve_platform(platform: Option<Platform>) -> Result<Platform> {
    match platform {
        Some(platform) => Ok(platform),
        None => Ok(host_target()?.1),
    }
}
