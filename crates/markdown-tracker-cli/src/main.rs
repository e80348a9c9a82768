//! markdown-tracker: scan markdown tables and save progress changes.
//!
//! Every command prints JSON on stdout; logs go to stderr.
//!
//! ```bash
//! markdown-tracker --data-dir ~/trackers scan
//! markdown-tracker tree
//! markdown-tracker save updates.json
//! markdown-tracker normalize
//! markdown-tracker --data-dir ~/trackers init
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use markdown_tracker_config::Config;
use markdown_tracker_engine::{
    SaveReport, SaveRequest, SaveResponse, ScanOptions, build_file_tree, io, normalize_directory,
    scan_directory, write_updates,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "markdown-tracker", version, about)]
struct Cli {
    /// Directory holding the markdown files (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every table found below the data directory
    Scan,
    /// Print the folder tree of markdown files
    Tree,
    /// Apply a save request read from FILE, or stdin when omitted
    Save { file: Option<PathBuf> },
    /// Add a progress column to every table that lacks one
    Normalize,
    /// Write the data directory to the config file
    Init,
}

/// Where to work and what to skip, after merging flags with the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    data_path: PathBuf,
    scan_options: ScanOptions,
}

fn resolve_settings(
    data_dir: Option<PathBuf>,
    config: Option<Config>,
    config_path: &Path,
) -> Result<Settings> {
    let scan_options = config
        .as_ref()
        .and_then(|config| config.excluded_dirs.clone())
        .map(|excluded_dirs| ScanOptions { excluded_dirs })
        .unwrap_or_default();

    let data_path = match (data_dir, config) {
        (Some(data_dir), _) => {
            log::info!("Using data directory from --data-dir: {}", data_dir.display());
            data_dir
        }
        (None, Some(config)) => {
            log::info!("Using data directory from {}", config_path.display());
            config.data_path
        }
        (None, None) => bail!(
            "No data directory given. Pass --data-dir or create a config file at {}",
            config_path.display()
        ),
    };

    Ok(Settings {
        data_path,
        scan_options,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_save_request(file: Option<&Path>) -> Result<SaveRequest> {
    let json = match file {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };
    serde_json::from_str(&json).context("Invalid save request")
}

/// Prints the response and reports whether every file was written.
fn finish(report: &SaveReport) -> Result<bool> {
    print_json(&SaveResponse::from(report))?;
    Ok(report.success)
}

/// Keeps the exclusions of an existing config, replacing only the data path.
fn init_config(root: &Path, existing: Option<Config>, config_path: &Path) -> Result<Config> {
    let data_path = std::fs::canonicalize(root)
        .with_context(|| format!("Failed to resolve {}", root.display()))?;
    let config = match existing {
        Some(existing) => Config {
            data_path,
            ..existing
        },
        None => Config::new(data_path),
    };
    config
        .save_to_path(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    log::info!("Wrote {}", config_path.display());
    Ok(config)
}

fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let settings = resolve_settings(cli.data_dir, config.clone(), &config_path)?;
    let root = settings.data_path.as_path();

    io::validate_root(root)
        .with_context(|| format!("Data directory '{}' is invalid", root.display()))?;

    match cli.command {
        Command::Scan => {
            let files = scan_directory(root, &settings.scan_options)?;
            print_json(&serde_json::json!({ "files": files }))?;
        }
        Command::Tree => {
            let tree = build_file_tree(root, &settings.scan_options)?;
            print_json(&serde_json::json!({ "tree": tree.root }))?;
        }
        Command::Save { file } => {
            let request = read_save_request(file.as_deref())?;
            log::info!("Saving {} update(s)", request.updates.len());
            return finish(&write_updates(&request.updates, root));
        }
        Command::Normalize => {
            return finish(&normalize_directory(root, &settings.scan_options)?);
        }
        Command::Init => {
            print_json(&init_config(root, config, &config_path)?)?;
        }
    }

    Ok(true)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if !run(cli)? {
        process::exit(1);
    }
    Ok(())
}
