//! OpenAPI document served by the Swagger UI.

use utoipa::OpenApi;

use crate::api::dto::{
    EntryResponse, ExitResponse, ExitingVehicleRequest, IncomingVehicleRequest, NextSpotResponse,
    SpotDto, SpotListResponse, TicketDto,
};
use crate::api::handlers::{spot, system, ticket, vehicle};
use crate::domain::{SpotId, VehicleType};
use crate::error::{ErrorBody, ErrorResponse};
use crate::service::FareSchedule;

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "parkit-gateway", description = "Parking lot spot allocation and ticketing"),
    paths(
        vehicle::incoming_vehicle,
        vehicle::exiting_vehicle,
        spot::list_spots,
        spot::next_spot,
        ticket::get_ticket,
        system::health_handler,
        system::fares_handler,
    ),
    components(schemas(
        IncomingVehicleRequest,
        ExitingVehicleRequest,
        EntryResponse,
        ExitResponse,
        SpotDto,
        NextSpotResponse,
        SpotListResponse,
        TicketDto,
        SpotId,
        VehicleType,
        FareSchedule,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Vehicles", description = "Vehicle entry and exit"),
        (name = "Spots", description = "Spot availability"),
        (name = "Tickets", description = "Ticket lookup"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;
