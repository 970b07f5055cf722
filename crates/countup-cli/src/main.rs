use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countup_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "countup")]
#[command(author, version, about = "Animate a number counting from one value to another")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the count, printing each value as it is reached
    Run(commands::CountArgs),
    /// Print every step of the count at once, without waiting
    Steps(commands::CountArgs),
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
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (errors surface after logging is up)
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.general.log_level.clone())
        .unwrap_or_else(|_| "info".into());

    // Initialize logging on stderr so values on stdout stay clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(log_level),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = config?;

    match cli.command {
        Some(Commands::Run(args)) => commands::run::run(&args, &config).await,
        Some(Commands::Steps(args)) => commands::steps::run(&args, &config),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
        },
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
