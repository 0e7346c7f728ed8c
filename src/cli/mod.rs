//! CLI for querying vehicles from the terminal.

pub mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// MyToyota connected-car CLI
#[derive(Parser, Debug)]
#[command(name = "mytoyota", version, about = "Query Toyota connected-car services")]
pub struct Cli {
    /// TOML file with username, password and optional overrides
    #[arg(short, long, default_value = "mytoyota.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands. Each prints the decoded response as JSON.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List vehicles on the account
    Vehicles,
    /// Last parked location
    Location(VinArgs),
    /// Warning lights and oil level
    Health(VinArgs),
    /// Doors, windows and locks
    RemoteStatus(VinArgs),
    /// Battery and charging state
    Electric(VinArgs),
    /// Odometer and fuel level
    Telemetry(VinArgs),
    /// Notification history
    Notifications(VinArgs),
    /// Trips in a date range
    Trips(TripsArgs),
    /// Dealer service records
    ServiceHistory(VinArgs),
}

#[derive(Args, Debug)]
pub struct VinArgs {
    /// Vehicle identification number
    pub vin: String,
}

#[derive(Args, Debug)]
pub struct TripsArgs {
    pub vin: String,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub to: NaiveDate,

    /// Include route points
    #[arg(long)]
    pub route: bool,

    /// Skip monthly summaries
    #[arg(long)]
    pub no_summary: bool,

    #[arg(long, default_value_t = 5)]
    pub limit: u32,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}
