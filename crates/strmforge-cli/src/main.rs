//! strmforge - media library mirroring into strm proxy trees
//!
//! Walks configured media roots and rebuilds a lightweight destination tree
//! where each video becomes a small text proxy pointing at a streaming
//! server, with artwork and sidecar files copied alongside.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};
use strmforge_config::{Profile, ProfileLoader};
use strmforge_engine::SyncEngine;
use strmforge_types::SyncStats;
use tracing::info;

/// strmforge - media library mirroring into strm proxy trees
#[derive(Parser)]
#[command(
    name = "strmforge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mirror media libraries into strm proxy trees",
    long_about = "strmforge rebuilds a media library as a tree of small strm proxy files,\n\
                  each holding a streaming URL in place of the original video, while\n\
                  copying artwork and sidecar files verbatim. The destination tree can\n\
                  be backed up to and restored from a remote store."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Profile file path
    #[arg(short, long)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full cycle: restore, lock check, flush, backup
    Run,
    /// Clear and regenerate the destination tree, ignoring the run lock
    Flush {
        /// Source roots to regenerate (defaults to all configured roots)
        roots: Vec<String>,
    },
    /// Compress the destination tree and upload it to the remote store
    Backup,
    /// Download the remote archive and restore it over the destination tree
    Restore,
    /// Show or generate the profile
    Profile {
        /// Show the built-in default profile
        #[arg(long)]
        default: bool,
        /// Write a default profile file to the given path
        #[arg(long)]
        generate: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Profile { default, generate } => {
            init_console_logging(cli.debug, cli.quiet, cli.verbose)?;
            profile_command(cli.profile.as_deref(), default, generate)
        }
        ref command => {
            let profile = load_profile(cli.profile.as_deref())?;
            let _guard = init_logging(cli.debug, cli.quiet, cli.verbose, &profile)?;

            info!("strmforge v{} starting", env!("CARGO_PKG_VERSION"));

            let engine = SyncEngine::new(profile);
            match command {
                Commands::Run => run_command(&engine, cli.quiet).await,
                Commands::Flush { roots } => {
                    flush_command(&engine, roots.clone(), cli.quiet).await
                }
                Commands::Backup => backup_command(&engine).await,
                Commands::Restore => restore_command(&engine).await,
                Commands::Profile { .. } => unreachable!("handled above"),
            }
        }
    }
}

fn load_profile(path: Option<&Path>) -> Result<Profile> {
    let profile = match path {
        Some(path) => ProfileLoader::load_from_file(path)
            .with_context(|| format!("failed to load profile from {}", path.display()))?,
        None => ProfileLoader::load_default().context("failed to load profile")?,
    };
    Ok(profile)
}

fn init_console_logging(debug: bool, quiet: bool, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level(debug, quiet, verbose)))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

/// Initialize console logging plus a daily log file next to the destination
/// tree. The returned guard must stay alive for the process lifetime.
fn init_logging(
    debug: bool,
    quiet: bool,
    verbose: bool,
    profile: &Profile,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level(debug, quiet, verbose)))?;

    let log_dir = profile
        .dest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, "strmforge.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    Ok(guard)
}

fn log_level(debug: bool, quiet: bool, verbose: bool) -> &'static str {
    if debug {
        "debug"
    } else if quiet {
        "error"
    } else if verbose {
        "trace"
    } else {
        "info"
    }
}

async fn run_command(engine: &SyncEngine, quiet: bool) -> Result<()> {
    if !quiet {
        println!(
            "{} Running full cycle against {}",
            style("→").green().bold(),
            style(engine.profile().server_base()).cyan()
        );
    }

    match engine.run().await? {
        Some(stats) => {
            if !quiet {
                print_sync_stats(&stats);
            }
        }
        None => {
            if !quiet {
                println!(
                    "{} Run lock present, destination left untouched",
                    style("ℹ").yellow()
                );
            }
        }
    }

    info!("run completed");
    Ok(())
}

async fn flush_command(engine: &SyncEngine, roots: Vec<String>, quiet: bool) -> Result<()> {
    let roots = if roots.is_empty() { None } else { Some(roots) };

    if !quiet {
        println!(
            "{} Regenerating destination tree",
            style("⟲").blue().bold()
        );
    }

    let stats = engine.flush(roots).await;
    if !quiet {
        print_sync_stats(&stats);
    }

    info!("flush completed");
    Ok(())
}

async fn backup_command(engine: &SyncEngine) -> Result<()> {
    println!("{} Uploading destination tree", style("→").green().bold());
    engine.backup().await?;
    println!("{} Backup completed", style("✓").green());
    Ok(())
}

async fn restore_command(engine: &SyncEngine) -> Result<()> {
    println!("{} Fetching remote archive", style("→").green().bold());
    engine.restore().await?;
    println!("{} Restore completed", style("✓").green());
    Ok(())
}

fn profile_command(path: Option<&Path>, default: bool, generate: Option<PathBuf>) -> Result<()> {
    if let Some(target) = generate {
        ProfileLoader::generate_default_profile(&target)
            .with_context(|| format!("failed to write {}", target.display()))?;
        println!(
            "{} Default profile written to {}",
            style("✓").green(),
            style(target.display()).cyan()
        );
        return Ok(());
    }

    let profile = if default {
        Profile::default()
    } else {
        load_profile(path)?
    };

    let header = if default {
        "Default profile:"
    } else {
        "Current profile:"
    };
    println!("{} {}", style("⚙").blue().bold(), style(header).bold());
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn print_sync_stats(stats: &SyncStats) {
    println!();
    println!("{}", style("Sync Statistics:").bold().underlined());
    println!("  Proxies created: {}", style(stats.proxies_created).green());
    println!(
        "  Proxies skipped: {}",
        style(stats.proxies_skipped).yellow()
    );
    println!("  Files copied: {}", style(stats.files_copied).green());
    println!("  Files ignored: {}", style(stats.files_ignored).yellow());
    println!(
        "  Errors: {}",
        if stats.errors > 0 {
            style(stats.errors).red()
        } else {
            style(stats.errors).green()
        }
    );
    println!(
        "  Duration: {}",
        style(format!("{:.2}s", stats.duration.as_secs_f64())).blue()
    );
}
