//! Command handlers: load config, call one endpoint, print JSON.

use serde::Serialize;

use super::{Cli, Commands, TripsArgs};
use crate::api::{Api, TripsQuery};
use crate::config::ClientConfig;
use crate::error::Result;

/// Run one CLI invocation to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(&cli.config)?;
    let api = Api::new(config)?;

    match cli.command {
        Commands::Vehicles => print(&api.get_vehicles().await?),
        Commands::Location(args) => print(&api.get_location(&args.vin).await?),
        Commands::Health(args) => print(&api.get_vehicle_health_status(&args.vin).await?),
        Commands::RemoteStatus(args) => print(&api.get_remote_status(&args.vin).await?),
        Commands::Electric(args) => print(&api.get_vehicle_electric_status(&args.vin).await?),
        Commands::Telemetry(args) => print(&api.get_telemetry(&args.vin).await?),
        Commands::Notifications(args) => print(&api.get_notifications(&args.vin).await?),
        Commands::Trips(args) => print(&api.get_trips(&args.vin, &trips_query(&args)).await?),
        Commands::ServiceHistory(args) => print(&api.get_service_history(&args.vin).await?),
    }
}

fn trips_query(args: &TripsArgs) -> TripsQuery {
    TripsQuery::builder()
        .from(args.from)
        .to(args.to)
        .route(args.route)
        .summary(!args.no_summary)
        .limit(args.limit)
        .offset(args.offset)
        .build()
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn trips_flags_map_onto_query() {
        let cli = Cli::try_parse_from([
            "mytoyota", "trips", "VIN", "--from", "2024-01-01", "--to", "2024-01-31",
            "--route", "--no-summary", "--limit", "10", "--offset", "20",
        ])
        .unwrap();
        let Commands::Trips(args) = cli.command else {
            panic!("expected Trips");
        };
        assert_eq!(
            trips_query(&args).path(),
            "/v1/trips?from=2024-01-01&to=2024-01-31&route=True&summary=False&limit=10&offset=20"
        );
    }
}
