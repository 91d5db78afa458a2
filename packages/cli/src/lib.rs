//! Shared setup for the extraction binaries.

use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load `.env` and initialize logging.
///
/// `RUST_LOG` controls verbosity; the default keeps the console quiet so
/// the summary stays readable.
pub fn init() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,hsds=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Print a section banner.
pub fn print_banner(title: &str) {
    let line = "=".repeat(80);
    println!("{}", line.bright_cyan());
    println!("{}", title.bright_cyan().bold());
    println!("{}", line.bright_cyan());
}
