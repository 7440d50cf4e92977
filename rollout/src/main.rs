//! Rollout configuration tools.
//!
//! Validates loop configs and snapshots experiment configs to
//! `<dir>/config.json` with type references and named objects replaced by
//! their names.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use rollout::io::config::{LoopConfig, load_config, read_config_tree, write_config};
use rollout::io::config_store::{render_config, save_config};
use rollout::logging;

#[derive(Parser)]
#[command(
    name = "rollout",
    version,
    about = "Policy rollout configuration tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default loop config if missing.
    Init {
        /// Target path.
        #[arg(default_value = "loop.toml")]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Load and validate a loop config.
    Check { path: PathBuf },
    /// Print an experiment config as display-mapped JSON.
    Show { conf: PathBuf },
    /// Write `<out_dir>/config.json` from an experiment config.
    SaveConfig { conf: PathBuf, out_dir: PathBuf },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { path, force } => cmd_init(&path, force),
        Command::Check { path } => cmd_check(&path),
        Command::Show { conf } => cmd_show(&conf),
        Command::SaveConfig { conf, out_dir } => cmd_save_config(&conf, &out_dir),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Ok(());
    }
    write_config(path, &LoopConfig::default())
}

fn cmd_check(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("loop config {} not found", path.display());
    }
    let cfg = load_config(path)?;
    println!(
        "horizon={} trials={}..{}",
        cfg.horizon, cfg.start_index, cfg.end_index
    );
    Ok(())
}

fn cmd_show(conf: &Path) -> Result<()> {
    let tree = read_config_tree(conf)?;
    print!("{}", render_config(&tree)?);
    Ok(())
}

fn cmd_save_config(conf: &Path, out_dir: &Path) -> Result<()> {
    let tree = read_config_tree(conf)?;
    let path = logging::timed("save config", || save_config(&tree, out_dir))?;
    println!("{}", path.display());
    Ok(())
}
