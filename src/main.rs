//! `ysx` — transpile YSX (YAML component description) files to JSX/TSX.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ysx::files::{load_file, transpile_file};
use ysx::TranspileOptions;

#[derive(Parser, Debug)]
#[command(name = "ysx", version)]
#[command(about = "CLI tool for transpiling YSX (YAML Syntax Extension) files")]
struct Cli {
    /// Log every absorbed degradation (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transpile a YSX file to JSX/TSX
    Transpile {
        /// Input YSX file
        input: PathBuf,
        /// Output file (defaults to the input with a .jsx/.tsx extension)
        output: Option<PathBuf>,
        /// Generate TypeScript output
        #[arg(long, conflicts_with = "no_typescript")]
        typescript: bool,
        /// Generate JavaScript output even when the config file asks for TypeScript
        #[arg(long)]
        no_typescript: bool,
    },
    /// Load and validate a YSX file without writing anything
    Check {
        /// Input YSX file
        input: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ysx=debug" } else { "ysx=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Transpile {
            input,
            output,
            typescript,
            no_typescript,
        } => {
            let choice = match (typescript, no_typescript) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = TranspileOptions::load().unwrap_or_default().with_typescript(choice);

            match transpile_file(&input, output.as_deref(), &options) {
                Ok(written) => {
                    let name = written.file_name().map_or_else(
                        || written.display().to_string(),
                        |n| n.to_string_lossy().into_owned(),
                    );
                    info!("Transpiled {} -> {}", input.display(), name);
                }
                Err(e) => {
                    error!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Check { input } => match load_file(&input) {
            Ok(_) => info!("{} is a valid YSX document", input.display()),
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
    }
}
