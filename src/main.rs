use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use matrixgen::annotations;
use matrixgen::commands::{generate_command, list_command};
use matrixgen::config::{Config, GenerateArgs};

#[derive(Parser)]
#[command(
    name = "matrixgen",
    about = "A CLI tool that generates CI build matrices for plugin repositories",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the build matrix (default command)
    Generate(GenerateArgs),

    /// List the plugins discovered in the current directory
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The one process-exit decision point: everything below returns
            // errors instead of exiting
            println!("{}", annotations::error(&format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Generate(args)) => {
            let config = Config::resolve(args)?;
            generate_command(&config)
        }
        Some(Commands::List) => list_command(),
        None => {
            // Default to generate, pulling everything from the environment
            let config = Config::resolve(GenerateArgs::from_env())?;
            generate_command(&config)
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("matrixgen=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("matrixgen=info"), // -v: info messages
        _ => EnvFilter::new("matrixgen=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
