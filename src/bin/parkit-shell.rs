//! Interactive parking console.
//!
//! Drives the same [`ParkingService`] as the HTTP gateway from a numbered
//! menu on stdin/stdout. Storage follows the gateway configuration.

use std::io::{BufRead, BufReader, Write};

use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use parkit_gateway::app_state::AppState;
use parkit_gateway::config::GatewayConfig;
use parkit_gateway::error::ParkingError;
use parkit_gateway::input::ConsoleInput;
use parkit_gateway::service::{ExitReceipt, ParkingService};

const MENU: [&str; 4] = [
    "Please select an option. Simply enter the number to choose an action",
    "1 New Vehicle Entering - Allocate Parking Space",
    "2 Vehicle Exiting - Generate Ticket Price",
    "3 Shutdown System",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;

    // Logs go to stderr so they never interleave with the prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let state = AppState::from_config(&config).await?;
    let mut console = ConsoleInput::new(BufReader::new(std::io::stdin()), std::io::stdout());

    console.say("Welcome to Parking System")?;
    run_menu(&state.parking_service, &mut console).await?;
    console.say("Exiting from the system!")?;
    Ok(())
}

/// Loops over the main menu until shutdown is chosen or input ends.
async fn run_menu<R, W>(
    service: &ParkingService,
    console: &mut ConsoleInput<R, W>,
) -> Result<(), ParkingError>
where
    R: BufRead + Send,
    W: Write + Send,
{
    loop {
        for line in MENU {
            console.say(line)?;
        }
        let Some(choice) = console.read_line()? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => park_vehicle(service, console).await?,
            "2" => exit_vehicle(service, console).await?,
            "3" => return Ok(()),
            _ => console
                .say("Unsupported option. Please enter a number corresponding to the provided menu")?,
        }
    }
}

async fn park_vehicle<R, W>(
    service: &ParkingService,
    console: &mut ConsoleInput<R, W>,
) -> Result<(), ParkingError>
where
    R: BufRead + Send,
    W: Write + Send,
{
    match service.process_incoming_vehicle(console).await {
        Ok(receipt) => {
            let ticket = &receipt.ticket;
            if receipt.returning_customer {
                let discount = (Decimal::ONE - service.fare_schedule().recurring_user_discount)
                    * Decimal::ONE_HUNDRED;
                console.say(&format!(
                    "Welcome back! As a recurring user of our parking lot, you'll benefit from a {}% discount.",
                    discount.normalize()
                ))?;
            }
            console.say("Generated Ticket and saved in DB")?;
            console.say(&format!(
                "Please park your vehicle in spot number: {}",
                ticket.spot.id
            ))?;
            console.say(&format!(
                "Recorded in-time for vehicle number: {} is: {}",
                ticket.registration_number, ticket.in_time
            ))
        }
        Err(ParkingError::SpotUnavailable(vehicle_type)) => console.say(&format!(
            "Error fetching parking number from DB. Parking slots might be full for {vehicle_type}"
        )),
        Err(err) => report(console, &err),
    }
}

async fn exit_vehicle<R, W>(
    service: &ParkingService,
    console: &mut ConsoleInput<R, W>,
) -> Result<(), ParkingError>
where
    R: BufRead + Send,
    W: Write + Send,
{
    match service.process_exiting_vehicle(console).await {
        Ok(receipt) => {
            for warning in exit_warnings(&receipt) {
                console.say(warning)?;
            }
            let ticket = &receipt.ticket;
            console.say(&format!("Please pay the parking fare: {}", ticket.price))?;
            match ticket.out_time {
                Some(out_time) => console.say(&format!(
                    "Recorded out-time for vehicle number: {} is: {}",
                    ticket.registration_number, out_time
                )),
                None => Ok(()),
            }
        }
        Err(err) => report(console, &err),
    }
}

/// Lines telling the operator which exit writes did not reach storage.
fn exit_warnings(receipt: &ExitReceipt) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if !receipt.ticket_updated {
        warnings.push("Unable to update ticket information. Error occurred");
    }
    if !receipt.spot_released {
        warnings.push("Unable to free the parking spot. Error occurred");
    }
    warnings
}

/// Prints a failed flow and keeps the shell running.
fn report<R, W>(console: &mut ConsoleInput<R, W>, err: &ParkingError) -> Result<(), ParkingError>
where
    R: BufRead + Send,
    W: Write + Send,
{
    if !err.is_not_found() {
        tracing::warn!(error = %err, "parking flow failed");
    }
    console.say(&format!("Unable to process vehicle: {err}"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use chrono::Utc;
    use parkit_gateway::domain::{EventBus, ParkingSpot, SpotId, Ticket, VehicleType};
    use parkit_gateway::persistence::InMemoryParkingStore;
    use parkit_gateway::service::FareSchedule;

    async fn session(script: &str) -> String {
        let service = ParkingService::new(
            Arc::new(InMemoryParkingStore::seeded(1, 1)),
            FareSchedule::default(),
            EventBus::new(8),
        );
        let mut console = ConsoleInput::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let Ok(()) = run_menu(&service, &mut console).await else {
            panic!("session should end cleanly");
        };
        let (_, output) = console.into_inner();
        String::from_utf8_lossy(&output).into_owned()
    }

    fn receipt(ticket_updated: bool, spot_released: bool) -> ExitReceipt {
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, spot_released);
        ExitReceipt {
            ticket: Ticket::open(spot, "AB-123".to_string(), Utc::now()),
            discount_applied: false,
            ticket_updated,
            spot_released,
        }
    }

    #[tokio::test]
    async fn park_then_exit_prints_spot_and_fare() {
        let output = session("1\n1\nAB-123\n2\nAB-123\n3\n").await;
        assert!(output.contains("Please park your vehicle in spot number: 1"));
        assert!(output.contains("Please pay the parking fare: 0"));
        assert!(output.contains("Recorded out-time for vehicle number: AB-123"));
        assert!(!output.contains("Error occurred"));
    }

    #[tokio::test]
    async fn unknown_option_and_vehicle_keep_the_menu_running() {
        let output = session("9\n2\nNOPE\n").await;
        assert!(output.contains("Unsupported option"));
        assert!(output.contains("Unable to process vehicle"));
        assert_eq!(output.matches(MENU[0]).count(), 3);
    }

    #[test]
    fn each_failed_exit_write_is_reported() {
        assert!(exit_warnings(&receipt(true, true)).is_empty());
        assert_eq!(
            exit_warnings(&receipt(false, true)),
            vec!["Unable to update ticket information. Error occurred"]
        );
        assert_eq!(
            exit_warnings(&receipt(true, false)),
            vec!["Unable to free the parking spot. Error occurred"]
        );
        assert_eq!(exit_warnings(&receipt(false, false)).len(), 2);
    }
}
