use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod script;

#[derive(Parser)]
#[command(name = "tappyswipey-cli", version, about = "TappySwipey CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every recognizable gesture
    Catalog(commands::catalog::CatalogArgs),
    /// List which tap recognizers wait for others to fail
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Replay a session script deterministically
    Simulate(commands::simulate::SimulateArgs),
    /// Play a real-time session, reading commands from stdin
    Play(commands::play::PlayArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "tappyswipey-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
