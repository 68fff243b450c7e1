use clap::{CommandFactory, Parser, Subcommand};

mod check;
mod inspect;
mod utils;


use check::handle_check;
use inspect::{handle_parse, handle_resolve, handle_short};

/// Get the version string including git revision
fn version() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (git:", env!("GIT_HASH"), ")")
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Inspect function-signature type expressions",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    /// RON file with extension types to add to the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse signatures and print their canonical form
    Parse {
        /// Signatures to parse, e.g. 'decimal<P,S>'
        #[arg(required = true)]
        signatures: Vec<String>,
        /// Print the syntax tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the short name of each signature's base type
    Short {
        #[arg(required = true)]
        signatures: Vec<String>,
    },
    /// Resolve signatures into concrete argument types
    Resolve {
        #[arg(required = true)]
        signatures: Vec<String>,
        /// Print the resolved type as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve every signature in a file, one per line ('-' for stdin)
    Check {
        /// The file to check
        file: String,
    },
}

/// Install a tracing subscriber when RUST_LOG is set, e.g. `RUST_LOG=typesig_core=trace`
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();

    match &cli.command {
        Some(Commands::Parse { signatures, json }) => {
            handle_parse(catalog, signatures, *json);
        }
        Some(Commands::Short { signatures }) => {
            handle_short(catalog, signatures);
        }
        Some(Commands::Resolve { signatures, json }) => {
            handle_resolve(catalog, signatures, *json);
        }
        Some(Commands::Check { file }) => {
            handle_check(catalog, file);
        }
        None => {
            if let Err(err) = Cli::command().print_help() {
                eprintln!("{err}");
                std::process::exit(1);
            }
            println!();
        }
    }
}
