use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use hostvoucher_common::traits::api::GamificationApi;
use hostvoucher_core::config::GamificationConfig;
use hostvoucher_core::eventbus::EventBus;
use hostvoucher_core::repositories::{InMemoryStateRepository, JsonFileStateRepository, StateRepository};
use hostvoucher_core::utils::SystemClock;
use hostvoucher_core::GamificationEngine;

mod commands;
mod events;

#[derive(Parser, Debug, Clone)]
#[command(name = "hostvoucher")]
#[command(author, version, about = "HostVoucher - points mining, action rewards and badges")]
struct Args {
    /// JSON config file (falls back to $HOSTVOUCHER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// State file location (falls back to $HOSTVOUCHER_STATE, then the config)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Admin ledger base URL (falls back to $HOSTVOUCHER_LEDGER_URL, then the config)
    #[arg(long)]
    ledger_url: Option<String>,

    /// Keep state in memory only; nothing is written to disk
    #[arg(long, default_value = "false")]
    ephemeral: bool,

    /// Run one console command, print its output and exit
    #[arg(long, short = 'c')]
    command: Option<String>,
}

fn init_tracing() {
    let _ = tracing_log::LogTracer::init();
    let filter = EnvFilter::from_default_env()
        .add_directive("hostvoucher=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    if tracing::subscriber::set_global_default(sub).is_err() {
        eprintln!("A global tracing subscriber was already set.");
    }
}

/// Config file, then environment, then command line; later layers win.
async fn resolve_config(args: &Args) -> anyhow::Result<GamificationConfig> {
    let config_path = args
        .config
        .clone()
        .or_else(|| env::var_os("HOSTVOUCHER_CONFIG").map(PathBuf::from));

    let mut config = match &config_path {
        Some(path) => GamificationConfig::load(path)
            .await
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GamificationConfig::default(),
    };

    if let Some(state) = env::var_os("HOSTVOUCHER_STATE") {
        config.state_path = Some(PathBuf::from(state));
    }
    if let Ok(url) = env::var("HOSTVOUCHER_LEDGER_URL") {
        if !url.trim().is_empty() {
            config.ledger_url = Some(url);
        }
    }
    if let Some(state) = &args.state {
        config.state_path = Some(state.clone());
    }
    if let Some(url) = &args.ledger_url {
        config.ledger_url = Some(url.clone());
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    let config = resolve_config(&args).await?;

    let repo: Arc<dyn StateRepository> = if args.ephemeral {
        info!("Running with in-memory state (--ephemeral).");
        Arc::new(InMemoryStateRepository::new())
    } else {
        let path = config.resolved_state_path();
        info!("Using state file {}", path.display());
        Arc::new(JsonFileStateRepository::new(path))
    };

    let engine = GamificationEngine::open(
        &config,
        repo,
        Arc::new(EventBus::new()),
        Arc::new(SystemClock),
    )
    .await
    .context("opening gamification engine")?;
    let api: Arc<dyn GamificationApi> = Arc::new(engine.clone());

    if let Some(line) = args.command.as_deref() {
        let (_, output) = commands::dispatch(line, &api).await;
        if let Some(text) = output {
            println!("{text}");
        }
        engine.shutdown().await;
        return Ok(());
    }

    let bus = engine.event_bus();
    let events_rx = bus.subscribe(None).await;
    let printer = tokio::spawn(events::print_events(events_rx, bus.shutdown_rx.clone()));

    let session = api.attach_session().await;
    info!("Console session {} attached; type 'help' for commands.", session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let (quit, output) = commands::dispatch(&line, &api).await;
        if let Some(text) = output {
            println!("{text}");
        }
        if quit {
            break;
        }
    }

    api.detach_session(session).await;
    engine.shutdown().await;
    let _ = printer.await;
    info!("HostVoucher console finished. Goodbye!");
    Ok(())
}
