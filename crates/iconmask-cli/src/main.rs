//! `iconmask` command line: build icon utility stylesheets from a config file.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use iconmask::config::{BuildConfig, DEFAULT_CONFIG_FILE};
use iconmask::pipeline::{engine_from_config, run_build, write_stylesheet};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iconmask")]
#[command(about = "Generate mask-based CSS icon utilities from SVG directories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file
    #[arg(long, short = 'c', global = true, env = "ICONMASK_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the stylesheet for the utilities used by the content sources
    Build {
        /// Output file, overriding the config; `-` writes to stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Rebuild whenever icons or content change
        #[arg(long, short = 'w')]
        watch: bool,
    },
    /// List every utility the configured icon sets provide
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = BuildConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Commands::Build { output, watch } => {
            initial_build(&config, output.as_deref(), watch)?;
            if watch {
                watch_and_rebuild(&cli.config, output.as_deref())?;
            }
        }
        Commands::List => list(&config)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "iconmask=debug" } else { "iconmask=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// First build of a `build` run.
///
/// In watch mode a failure is logged so the watch loop still starts.
fn initial_build(config: &BuildConfig, output: Option<&Path>, watch: bool) -> Result<()> {
    let result = build_once(config, output.or(config.output.as_deref()));
    match result {
        Err(e) if watch => {
            tracing::error!("{:#}", e);
            Ok(())
        }
        other => other,
    }
}

fn build_once(config: &BuildConfig, output: Option<&Path>) -> Result<()> {
    let css = run_build(config).context("Build failed")?;

    match output {
        Some(path) if path != Path::new("-") => write_stylesheet(path, &css)?,
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(css.to_css().as_bytes())?;
            stdout.flush()?;
        }
    }

    if !css.is_complete() {
        info!("{} utilities skipped", css.failures.len());
    }
    Ok(())
}

fn list(config: &BuildConfig) -> Result<()> {
    let engine = engine_from_config(config)?;
    let mut stdout = std::io::stdout().lock();
    for name in engine.utility_names() {
        writeln!(stdout, "{name}")?;
    }
    Ok(())
}

#[cfg(feature = "hot-reload")]
fn watch_and_rebuild(config_path: &Path, output: Option<&Path>) -> Result<()> {
    use iconmask::config::WatchedPath;
    use iconmask::hot_reload::AssetWatcher;
    use std::time::Duration;

    fn watch_sources(watcher: &mut AssetWatcher, config: &BuildConfig) -> Result<()> {
        for path in config.watched_paths() {
            match path {
                WatchedPath::Icons(dir) => watcher.watch_icons(dir)?,
                WatchedPath::Content(path) => watcher.watch_content(path)?,
            }
        }
        Ok(())
    }

    let mut config = BuildConfig::load(config_path)?;
    let mut watcher = AssetWatcher::new()?;
    watcher.watch_content(config_path)?;
    watch_sources(&mut watcher, &config)?;

    info!("Watching {} paths for changes", watcher.watched_count());
    loop {
        let changes = watcher.wait(Duration::from_secs(1));
        if changes.is_empty() {
            continue;
        }
        info!("{} files changed, rebuilding", changes.len());

        if changes.iter().any(|c| c.path.ends_with(config_path.file_name().unwrap_or_default())) {
            match BuildConfig::load(config_path) {
                Ok(reloaded) => {
                    config = reloaded;
                    watch_sources(&mut watcher, &config)?;
                }
                Err(e) => {
                    tracing::error!("Keeping previous config: {}", e);
                    continue;
                }
            }
        }

        if let Err(e) = build_once(&config, output.or(config.output.as_deref())) {
            tracing::error!("{:#}", e);
        }
    }
}

#[cfg(not(feature = "hot-reload"))]
fn watch_and_rebuild(_config_path: &Path, _output: Option<&Path>) -> Result<()> {
    anyhow::bail!("--watch requires building with the `hot-reload` feature")
}
