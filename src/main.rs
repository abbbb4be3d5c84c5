//! `pagescan`: extract readable text, metadata and categories from an HTML page.

mod cli;

use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    let args = cli::Cli::parse_args();

    let default_filter = if args.trace {
        "warn,extract.debug=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::run(args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
