use clap::Parser;

use cover_studio::cli::{self, Args};
use cover_studio::config::SESSION_TOKEN_ENV;

/// Load .env file and check for a session token
///
/// Does not override existing environment variables.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();

    if std::env::var(SESSION_TOKEN_ENV).is_err() {
        log::debug!("{} not set, falling back to the config file", SESSION_TOKEN_ENV);
    }
}

#[tokio::main]
async fn main() {
    load_env();

    let args = Args::parse();

    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
