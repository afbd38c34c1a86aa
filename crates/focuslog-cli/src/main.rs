use clap::{CommandFactory, Parser, Subcommand};
use focuslog_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "focuslog", version, about = "Focus session tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive focus session on stdin
    Session(commands::session::SessionArgs),
    /// Analyze a synthetic session without running one
    Report(commands::report::ReportArgs),
    /// List distraction types
    Types {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("FOCUSLOG_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config.logging.level);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "falling back to default configuration");
    }

    let result = match cli.command {
        Commands::Session(args) => commands::session::run(args, &config),
        Commands::Report(args) => commands::report::run(args, &config),
        Commands::Types { json } => commands::types::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focuslog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
