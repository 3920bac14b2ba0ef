mod application;

mod presentation {
    pub mod cli;
}

use tracing_subscriber::EnvFilter;
use trombi_core::error::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    application::run()
}
