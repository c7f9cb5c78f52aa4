use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use zonewm::actor;
use zonewm::actor::display_server::HeadlessDisplayServer;
use zonewm::actor::reactor::{Event, Reactor, Record, replay};
use zonewm::common::config::Config;
use zonewm::common::log;
use zonewm::layout_engine::partition;
use zonewm::sys::geometry::Rect;
use zonewm::sys::screen::ScreenInfo;

#[derive(Debug, Parser)]
#[command(name = "zonewm", about = "Zone-based window manager core", version)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the zones the given monitors are partitioned into, as JSON.
    Zones {
        /// Monitor geometry as WIDTHxHEIGHT+X+Y, in monitor order.
        #[arg(long = "monitor", required = true)]
        monitors: Vec<Rect>,
    },

    /// Run a recorded session and print every display server request as a
    /// JSON line.
    Replay {
        file: PathBuf,
        /// Record the replayed session again.
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Load and validate the config file.
    #[command(name = "check-config")]
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::init_logging(cli.verbose);
    let config = Config::load(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Zones { monitors } => {
            let zones = partition(&ScreenInfo::from_frames(monitors), &config.settings.zones);
            println!("{}", serde_json::to_string_pretty(&zones)?);
        }
        Commands::Replay { file, record } => run_replay(config, &file, record)?,
        Commands::CheckConfig => {
            println!("{}", config.to_toml().context("serializing config")?);
            info!(rules = config.rules.len(), "Config is valid");
        }
    }
    Ok(())
}

fn run_replay(config: Config, file: &std::path::Path, record: Option<PathBuf>) -> anyhow::Result<()> {
    let mut events = Vec::new();
    replay(file, |event| events.push(event))
        .with_context(|| format!("reading {}", file.display()))?;
    let mut events = events.into_iter();
    let Some(Event::ScreenParametersChanged(screens)) = events.next() else {
        bail!("{} does not start with a screen list", file.display());
    };

    let record = Record::new(record.as_deref())?;
    let (display_tx, display_rx) = actor::channel();
    let reactor = Reactor::new(config, screens, record, display_tx)?;
    let (events_tx, events_rx) = actor::channel();
    for event in events {
        events_tx.send(event);
    }
    drop(events_tx);

    let display_server = HeadlessDisplayServer::new(display_rx).with_output(std::io::stdout());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("starting runtime")?;
    let ((), requests) = runtime.block_on(async {
        tokio::join!(reactor.run(events_rx), display_server.run())
    });
    info!(requests, "Replay finished");
    Ok(())
}
