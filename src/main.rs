use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ConfigCommand, FoodCommand, LoginCommand, LogoutCommand, MealPlanCommand, ReportCommand,
    ScheduleCommand, SeedCommand, SignupCommand, WhoamiCommand, WorkoutCommand,
};
use config::{Config, LatencyMode};
use genaifit_core::{Backend, Delay, FileStore, KeyValueStore, NoDelay, TokioDelay};

#[derive(Parser)]
#[command(name = "genaifit")]
#[command(version)]
#[command(about = "Workouts, nutrition and meal planning on a simulated backend", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login(LoginCommand),

    /// Create an account and sign in
    Signup(SignupCommand),

    /// Sign out
    Logout(LogoutCommand),

    /// Show the signed-in user
    Whoami(WhoamiCommand),

    /// Browse and complete workouts
    Workout(WorkoutCommand),

    /// Manage the food log
    Food(FoodCommand),

    /// Manage the weekly workout schedule
    Schedule(ScheduleCommand),

    /// Manage meal plans
    Mealplan(MealPlanCommand),

    /// Export data to a file
    Report(ReportCommand),

    /// Insert the demo account and workouts
    Seed(SeedCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genaifit=warn,genaifit_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    let backend = open_backend(&config);

    match cli.command {
        Some(Commands::Login(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Signup(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Logout(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Whoami(cmd)) => cmd.run(&backend)?,
        Some(Commands::Workout(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Food(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Schedule(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Mealplan(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Report(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Seed(cmd)) => cmd.run(&backend).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Builds a backend persisting into the configured data directory.
fn open_backend(config: &Config) -> Backend {
    tracing::debug!("Using data directory {}", config.data_dir.value.display());

    let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.value.clone()));
    let delay: Arc<dyn Delay> = match config.latency.value {
        LatencyMode::Simulated => Arc::new(TokioDelay),
        LatencyMode::None => Arc::new(NoDelay),
    };
    Backend::new(kv, delay)
}
