//! Design Snippets CLI
//!
//! Usage:
//!   design-snippets [OPTIONS] <DOCUMENT>
//!
//! Options:
//!   -c, --config <FILE>        Configuration file (TOML format)
//!   -r, --request <JSON>       Run a single JSON request
//!   -l, --list                 List variable collections
//!   -C, --collection <ID>      Export a collection's variables
//!   -f, --format <FORMAT>      Format string for --collection
//!   -v, --verbose              Debug logging on stderr
//!       --print-config         Print the default configuration
//!   -h, --help                 Print help
//!
//! Without --request, --list or --collection, newline-delimited JSON requests
//! are read from stdin and one JSON response is written per line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use design_snippets::{dispatch, dispatch_json, Config, Fetcher, Payload, Request, Response, Snapshot};

#[derive(Parser)]
#[command(name = "design-snippets")]
#[command(about = "Style-sheet snippets from design document variables and text styles")]
struct Cli {
    /// Document snapshot (JSON)
    #[arg(required_unless_present = "print_config")]
    document: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single JSON request, e.g. '{"operation":"list-collections"}'
    #[arg(short, long, conflicts_with_all = ["list", "collection"])]
    request: Option<String>,

    /// List variable collections
    #[arg(short, long)]
    list: bool,

    /// Export the variables of this collection
    #[arg(short = 'C', long, requires = "format")]
    collection: Option<String>,

    /// Format string used with --collection
    #[arg(short, long)]
    format: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.print_config {
        print!("{}", Config::default_toml());
        return;
    }

    // Load config
    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Load document
    let Some(document) = &cli.document else {
        eprintln!("Error: no document given");
        std::process::exit(2);
    };
    let snapshot = match Snapshot::from_file(document) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading document '{}': {}", document.display(), e);
            std::process::exit(1);
        }
    };
    let fetcher = Fetcher::new(snapshot, &config.fetch);

    let single = if let Some(json) = &cli.request {
        Some(dispatch_json(json, &fetcher, &config).await)
    } else if cli.list {
        Some(dispatch(Request::new("list-collections"), &fetcher, &config).await)
    } else if let (Some(collection), Some(format)) = (&cli.collection, &cli.format) {
        let request = Request::new("export-variables")
            .with_format(format.as_str())
            .with_collection(collection.as_str());
        Some(dispatch(request, &fetcher, &config).await)
    } else {
        None
    };

    match single {
        Some(responses) => {
            let failed = print_human(&responses);
            if failed {
                std::process::exit(1);
            }
        }
        None => {
            if let Err(e) = serve_stdin(&fetcher, &config).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Print responses for a terminal; returns true if any was an error
fn print_human(responses: &[Response]) -> bool {
    let mut failed = false;
    for response in responses {
        if response.is_error() {
            failed = true;
            if let Some(message) = response.as_text() {
                eprintln!("Error: {}", message);
            }
            continue;
        }
        match &response.payload {
            Payload::Text(text) => println!("{}", text),
            Payload::Collections(list) => {
                for c in list {
                    println!("{}\t{}", c.id, c.name);
                }
            }
        }
    }
    failed
}

/// Answer newline-delimited JSON requests from stdin until EOF
async fn serve_stdin(fetcher: &Fetcher<Snapshot>, config: &Config) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        for response in dispatch_json(&line, fetcher, config).await {
            let encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
            writeln!(stdout, "{}", encoded)?;
        }
        stdout.flush()?;
    }
    Ok(())
}
