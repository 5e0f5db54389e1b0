//! menurun - Main entry point
//!
//! Discovers program units once at startup, then either serves the
//! interactive menu or handles one of the headless subcommands.

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use menurun::cli::{Cli, Commands};
use menurun::{Catalog, menu, registry};

/// Initialize the logger with appropriate settings
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            // RUST_LOG overrides; default keeps the console quiet below warn
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    info!("menurun starting up");

    let cli = Cli::parse_args();
    let config = cli.launcher_config();
    debug!(units_dir = %config.units_dir.display(), "CLI arguments parsed");

    // Discovery happens once; the catalog is immutable afterwards.
    let catalog = registry::discover(&config)?;

    match cli.command {
        Some(Commands::List) => {
            report_failures(&catalog);
            for descriptor in catalog.units() {
                println!("{:<20} {}", descriptor.id(), descriptor.label());
            }
        }
        Some(Commands::Run { id }) => {
            report_failures(&catalog);
            let Some(descriptor) = catalog.find(&id) else {
                eprintln!("✗ Unknown unit '{}'. Try `menurun list`.", id);
                std::process::exit(1);
            };
            descriptor.instantiate().run()?;
        }
        None => {
            menu::run_menu(&catalog)?;
        }
    }

    Ok(())
}

/// Per-candidate discovery failures go to stderr; they never stop the run.
fn report_failures(catalog: &Catalog) {
    for failure in catalog.failures() {
        eprintln!("warning: {failure}");
    }
}
