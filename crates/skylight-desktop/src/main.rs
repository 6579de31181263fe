//! Skylight Desktop - Main entry point
//!
//! Runs the Skylight page in a native window.

use anyhow::{bail, Result};
use clap::Parser;
use skylight_core::{page_root, ViewerConfig};
use skylight_scene::{build_app, PageShell};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "skylight")]
#[command(about = "A lit 3D scene with orbit controls under a page heading")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "skylight.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the page fragment as JSON and exit
    #[arg(long)]
    print_page: bool,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.write_default_config {
        ViewerConfig::save_default(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let mut config = ViewerConfig::load(&args.config)?;
    if let Some(level) = args.log_level {
        config.log.level = level;
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log.max_level())
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Skylight v{}", env!("CARGO_PKG_VERSION"));

    let page = page_root();
    if args.print_page {
        println!("{}", page.to_json()?);
        return Ok(());
    }

    info!(
        config = %args.config.display(),
        camera = ?config.camera.position,
        "Configuration loaded"
    );

    let exit = build_app(&config, &page, PageShell::Native).run();
    if exit.is_error() {
        bail!("viewer exited with an error: {:?}", exit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["skylight"]).unwrap();
        assert_eq!(args.config, PathBuf::from("skylight.toml"));
        assert!(args.log_level.is_none());
        assert!(!args.print_page);
        assert!(args.write_default_config.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "skylight",
            "--config",
            "demo.toml",
            "-l",
            "debug",
            "--print-page",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("demo.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.print_page);
    }
}
