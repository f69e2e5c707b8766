use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use docmodern::Result;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docmodern")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Legacy procedure document modernizer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print its section tree
    Inspect {
        /// Reader-exported document (.json)
        path: PathBuf,
    },

    /// Convert a document, or a folder of documents, to canonical JSON
    Convert {
        /// Input .json file or directory
        path: PathBuf,

        /// Output directory (defaults to next to each input)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect { path } => docmodern::cli::inspect::run(&path)?,
        Commands::Convert { path, out } => docmodern::cli::convert::run(&path, out.as_deref())?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }
    Ok(())
}
