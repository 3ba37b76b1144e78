use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoothscroll_core::{AppConfig, Axis, SpeedLevel};

mod commands;

#[derive(Parser)]
#[command(name = "smoothscroll")]
#[command(author, version, about = "Smooth, decelerating scrolling for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through a file with smooth mouse-wheel scrolling
    View {
        /// File to display
        file: PathBuf,
    },
    /// Run the animator on a request and print the emitted steps
    Simulate {
        /// Distance to scroll (positive = up/left, like a wheel delta)
        #[arg(short, long, allow_negative_numbers = true)]
        distance: f64,
        /// Animation speed (slow, normal, fast); defaults to the configured one
        #[arg(short, long)]
        speed: Option<SpeedLevel>,
        /// Animate the horizontal axis
        #[arg(long)]
        horizontal: bool,
        /// Number of identical requests to send
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,
        /// Delay between repeated requests in milliseconds
        #[arg(long, default_value_t = 50)]
        every: u64,
        /// Cancel the animation after this many milliseconds
        #[arg(long)]
        stop_after: Option<u64>,
        /// Print the steps as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Log file used while the terminal is owned by the pager
fn view_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smoothscroll")
        .join("view.log")
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let path = view_log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // The pager owns the terminal, so its logs go to a file
    init_logging(&config, matches!(cli.command, Commands::View { .. }))?;

    match cli.command {
        Commands::View { file } => commands::view::run(config, &file).await,
        Commands::Simulate {
            distance,
            speed,
            horizontal,
            repeat,
            every,
            stop_after,
            json,
        } => {
            let options = commands::simulate::SimulateOptions {
                distance,
                speed: speed.unwrap_or(config.scroll.speed),
                axis: if horizontal { Axis::Horizontal } else { Axis::Vertical },
                repeat,
                every_ms: every,
                stop_after_ms: stop_after,
            };
            commands::simulate::run(&config, options, json).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}
