use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use procrastination_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "procrastination-cli",
    version,
    about = "Procrastination detection from activity and task logs"
)]
struct Cli {
    /// Data snapshot file (overrides storage.data_file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Student identity
    Student {
        #[command(subcommand)]
        action: commands::student::StudentAction,
    },
    /// Activity logging
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Time distribution, procrastination index and chart data
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
    /// Predict procrastination risk for a deadline
    Predict(commands::predict::PredictArgs),
    /// Print the analysis report and save it to a file
    Report(commands::report::ReportArgs),
    /// Replace all records with generated sample data
    Sample(commands::sample::SampleArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn init_tracing() {
    let level = Config::load_or_default().log.level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Keep an already-installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let data = cli.data.as_deref();
    let result = match cli.command {
        Commands::Student { action } => commands::student::run(action, data),
        Commands::Activity { action } => commands::activity::run(action, data),
        Commands::Task { action } => commands::task::run(action, data),
        Commands::Analyze { action } => commands::analyze::run(action, data),
        Commands::Predict(args) => commands::predict::run(args, data),
        Commands::Report(args) => commands::report::run(args, data),
        Commands::Sample(args) => commands::sample::run(args, data),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
