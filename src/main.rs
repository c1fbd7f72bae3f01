use std::path::PathBuf;
use std::time::Duration;

use port_sweep_rs::config::{OutputMode, PortSpec, ScanConfiguration};
use port_sweep_rs::{report, scanner};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// port-sweep-rs — concurrent TCP connect port scanner with optional banner grabbing.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "port-sweep-rs",
    version,
    about = "Concurrent TCP connect port scanner with optional banner grabbing.",
    long_about = None
)]
struct Cli {
    /// Target IP or hostname.
    #[arg(long, default_value = "scanme.nmap.org")]
    target: String,

    /// First port of the range (inclusive).
    #[arg(long = "start-port", default_value_t = 1)]
    start_port: u16,

    /// Last port of the range (inclusive).
    #[arg(long = "end-port", default_value_t = 1024)]
    end_port: u16,

    /// Comma-separated list of ports; overrides the range when given.
    #[arg(long)]
    ports: Option<String>,

    /// Number of concurrent workers.
    #[arg(long, default_value_t = 100)]
    workers: usize,

    /// Connect and banner-read timeout in seconds.
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Read an initial banner from each open port.
    #[arg(long, default_value_t = false)]
    banner: bool,

    /// Print open ports as JSON instead of the text summary.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write open ports as pretty JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<ScanConfiguration> {
        let spec = PortSpec::from_parts(self.ports.as_deref(), self.start_port, self.end_port)?;
        let mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Ok(ScanConfiguration::new(self.target, spec)
            .with_workers(self.workers)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_banner_grab(self.banner)
            .with_output_mode(mode))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = cli.output.clone();
    let config = cli.into_config()?;
    let summary = scanner::execute(&config).await?;

    match config.output_mode {
        OutputMode::Json => {
            println!("{}", report::to_json(&summary)?);
            report::write_elapsed(&mut std::io::stderr().lock(), &summary)?;
        }
        OutputMode::Human => {
            report::write_human(&mut std::io::stdout().lock(), &summary)?;
        }
    }

    if let Some(path) = output.as_deref() {
        report::write_json_file(path, &summary)?;
        info!(path = %path.display(), "wrote JSON results");
    }

    Ok(())
}
