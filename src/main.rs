//! MyToyota CLI binary entry point.

use clap::Parser;
use mytoyota::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = mytoyota::cli::commands::run(cli).await {
        eprintln!("Error: {e}");
        if let Some(status) = e.status() {
            eprintln!("HTTP status: {status}");
        }
        eprintln!("Hint: {:?}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
