use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use devfleet::Config;
use devfleet::DeviceRegistry;
use devfleet::LoadReport;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "devfleet", version, about = "Manage a small fleet of devices")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device file to load, overrides `registry.devices_file`
    #[arg(short, long)]
    devices: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every device
    List,
    /// Print load diagnostics, failing if any line was skipped
    Check,
    /// Turn a device on and print it
    TurnOn { id: i32 },
    /// Turn a device off and print it
    TurnOff { id: i32 },
    /// Remove a device and print the remaining ones
    Remove { id: i32 },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Logs go to stderr so listings on stdout stay clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(config.log_filter())
        .init();

    let devices_file = cli.devices.or(config.registry.devices_file);
    let (mut registry, report) = match &devices_file {
        Some(path) => DeviceRegistry::from_file(path)
            .with_context(|| format!("loading devices from {}", path.display()))?,
        None => {
            tracing::info!("No device file configured, starting with an empty registry");
            (DeviceRegistry::new(), LoadReport::default())
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => registry.show_all(&mut out)?,
        Command::Check => {
            write!(out, "{}", report.format())?;
            let failed = report.errors().count();
            if failed > 0 {
                anyhow::bail!("{} line(s) could not be loaded", failed);
            }
            writeln!(out, "{} device(s) loaded", registry.len())?;
        }
        Command::TurnOn { id } => {
            let device = registry.turn_on(id)?;
            writeln!(out, "{}", device)?;
        }
        Command::TurnOff { id } => {
            let device = registry.turn_off(id)?;
            writeln!(out, "{}", device)?;
        }
        Command::Remove { id } => {
            registry.remove(id)?;
            registry.show_all(&mut out)?;
        }
    }

    Ok(())
}
