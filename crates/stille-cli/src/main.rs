use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

mod audio;
mod commands;
mod logging;
mod screen;

#[derive(Parser)]
#[command(name = "stille", version, about = "Meditation timer with ambient sound")]
struct Cli {
    /// Config file (default: ~/.config/stille/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug logging for stille crates
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer screen (default)
    Screen {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Run one session and exit when it ends
    Start(commands::session::StartArgs),
    /// List the ambient sounds
    Sounds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command.unwrap_or(Commands::Screen { json: false }) {
        Commands::Screen { json } => commands::session::run_screen(config, json),
        Commands::Start(args) => commands::session::run_start(config, args),
        Commands::Sounds { json } => commands::sounds::run(config, json),
        Commands::Config { action } => commands::config::run(config, action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "stille", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
