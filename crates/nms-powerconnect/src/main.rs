//! powerconnect-poll - PowerConnect driver runner
//!
//! Runs one driver module against a recorded device snapshot and prints the
//! resulting records as JSON on stdout.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use nms_driver_common::{
    init_logging, DeviceDriver, PollerConfig, Snapshot, SnapshotQuery, StoredProcessor,
    DEFAULT_CONFIG_PATH,
};
use nms_powerconnect::{PowerConnect, PowerConnectVariant};

/// Dell PowerConnect poller
#[derive(Parser, Debug)]
#[command(name = "powerconnect-poll")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Poller configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Recorded device snapshot (JSON)
    #[arg(short = 's', long)]
    snapshot: PathBuf,

    /// Log level, overrides the configuration file
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print the model family the device classifies as
    Classify,
    /// Discover processors
    Discover,
    /// Discover processors, then poll them once
    Poll,
    /// Poll NAC sessions
    Nac,
}

#[derive(Serialize)]
struct Classification<'a> {
    sys_object_id: &'a str,
    variant: &'static str,
    cpu_load_root: Option<&'static str>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize records")?;
    println!("{}", json);
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<PollerConfig> {
    let mut config = PollerConfig::load_or_default(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn run(args: Args, config: PollerConfig) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    let device = snapshot.device.clone();
    let query = Arc::new(SnapshotQuery::new(snapshot));

    let mut driver = PowerConnect::new(query.clone(), query);
    if let Some(mib_dir) = &config.snmp.mib_dir {
        driver = driver.with_mib_dir(mib_dir.as_str());
    }

    info!(
        device = %device.device_id,
        hostname = %device.hostname,
        os = driver.os_name(),
        command = ?args.command,
        "Polling device"
    );

    match args.command {
        Command::Classify => {
            let variant = PowerConnectVariant::classify(&device.sys_object_id);
            print_json(&Classification {
                sys_object_id: &device.sys_object_id,
                variant: variant.as_str(),
                cpu_load_root: variant.cpu_load_root(),
            })
        }
        Command::Discover | Command::Poll if !config.modules.processors => {
            bail!("processors module is disabled in {}", args.config.display())
        }
        Command::Discover => {
            let Some(discovery) = driver.processor_discovery() else {
                bail!("{} does not support processor discovery", driver.os_name());
            };
            let processors = discovery.discover_processors(&device).await?;
            print_json(&processors)
        }
        Command::Poll => {
            let (Some(discovery), Some(polling)) =
                (driver.processor_discovery(), driver.processor_polling())
            else {
                bail!("{} does not support processor polling", driver.os_name());
            };
            let stored: Vec<StoredProcessor> = discovery
                .discover_processors(&device)
                .await?
                .into_iter()
                .zip(1..)
                .map(|(processor, id)| processor.stored(id))
                .collect();
            let readings = polling.poll_processors(&device, &stored).await?;
            print_json(&readings)
        }
        Command::Nac if !config.modules.nac => {
            bail!("nac module is disabled in {}", args.config.display())
        }
        Command::Nac => {
            let Some(nac) = driver.nac_polling() else {
                bail!("{} does not support NAC polling", driver.os_name());
            };
            let sessions = nac.poll_nac(&device).await?;
            print_json(&sessions)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("powerconnect-poll: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("powerconnect-poll: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
