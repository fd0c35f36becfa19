mod input;
mod session;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::application::InventoryService;
use crate::storage::DEFAULT_CATALOG_PATH;

pub use input::*;
pub use session::Session;

/// Tiendita - inventory and checkout
#[derive(Parser)]
#[command(name = "tiendita")]
#[command(about = "Keep a small product inventory, fill a cart and pay for it")]
#[command(version)]
pub struct Cli {
    /// Catalog file path
    #[arg(short, long, default_value = DEFAULT_CATALOG_PATH)]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Logs go to stderr so they never mix with the menu on stdout.
    /// `RUST_LOG` takes precedence over `--verbose`.
    fn init_logging(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    pub fn run(self) -> Result<()> {
        self.init_logging();
        tracing::debug!(file = %self.file.display(), "starting session");

        let service = InventoryService::open(self.file);
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = Session::new(service, stdin.lock(), stdout.lock());
        session.run()
    }
}
