use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::RegistryError;
use crate::models::{Airport, BookingOutcome, City, Flight, FlightId, Passenger, PassengerId, Stats};
use crate::state::AppState;

/// Reply sent after every successful registration.
const REGISTERED: &str = "SUCCESS";

/// Reply for a route with no direct flight.
const NO_ROUTE: i64 = -1;

/// Body of booking and cancellation requests.
#[derive(Debug, Deserialize, Serialize)]
pub struct TicketRequest {
    pub flight_id: FlightId,
    pub passenger_id: PassengerId,
}

/// Query parameters for the shortest route endpoint.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: City,
    pub to: City,
}

/// Query parameters for the occupancy endpoint.
#[derive(Debug, Deserialize)]
pub struct OccupancyQuery {
    pub date: NaiveDate,
}

/// Builds the HTTP router over the shared registry.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/airports", post(add_airport))
        .route("/airports/largest", get(largest_airport))
        .route("/airports/{name}/occupancy", get(occupancy))
        .route("/flights", post(add_flight))
        .route("/flights/{id}/fare", get(fare))
        .route("/flights/{id}/revenue", get(revenue))
        .route("/flights/{id}/origin-airport", get(origin_airport))
        .route("/passengers", post(add_passenger))
        .route("/passengers/{id}/bookings", get(booking_count))
        .route("/bookings", post(book_ticket))
        .route("/bookings/cancel", post(cancel_ticket))
        .route("/routes/shortest", get(shortest_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /status - Entity counts.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<Stats> {
    Json(state.registry.read().await.stats())
}

/// POST /airports - Register an airport.
pub async fn add_airport(
    State(state): State<Arc<AppState>>,
    Json(airport): Json<Airport>,
) -> Json<&'static str> {
    state.registry.write().await.register_airport(airport);
    Json(REGISTERED)
}

/// POST /flights - Register a flight.
pub async fn add_flight(
    State(state): State<Arc<AppState>>,
    Json(flight): Json<Flight>,
) -> Json<&'static str> {
    state.registry.write().await.register_flight(flight);
    Json(REGISTERED)
}

/// POST /passengers - Register a passenger.
pub async fn add_passenger(
    State(state): State<Arc<AppState>>,
    Json(passenger): Json<Passenger>,
) -> Json<&'static str> {
    state.registry.write().await.register_passenger(passenger);
    Json(REGISTERED)
}

/// POST /bookings - Book a ticket.
pub async fn book_ticket(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TicketRequest>,
) -> Json<BookingOutcome> {
    let outcome = state
        .registry
        .write()
        .await
        .book_ticket(request.flight_id, request.passenger_id);
    Json(outcome)
}

/// POST /bookings/cancel - Cancel a ticket.
pub async fn cancel_ticket(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TicketRequest>,
) -> Json<BookingOutcome> {
    let outcome = state
        .registry
        .write()
        .await
        .cancel_ticket(request.flight_id, request.passenger_id);
    Json(outcome)
}

/// GET /passengers/{id}/bookings - Booking count of a passenger.
pub async fn booking_count(
    State(state): State<Arc<AppState>>,
    Path(passenger_id): Path<PassengerId>,
) -> Json<u32> {
    Json(state.registry.read().await.booking_count(passenger_id))
}

/// GET /airports/largest - Airport with the most terminals, or "".
pub async fn largest_airport(State(state): State<Arc<AppState>>) -> Json<String> {
    let registry = state.registry.read().await;
    Json(registry.largest_airport().unwrap_or_default().to_string())
}

/// GET /routes/shortest - Shortest direct duration in minutes, or -1.
pub async fn shortest_route(
    State(state): State<Arc<AppState>>,
    Query(route): Query<RouteQuery>,
) -> Json<i64> {
    let shortest = state
        .registry
        .read()
        .await
        .shortest_direct_duration(&route.from, &route.to);
    debug!(from = %route.from, to = %route.to, ?shortest, "shortest route lookup");
    Json(shortest.map_or(NO_ROUTE, i64::from))
}

/// GET /flights/{id}/fare - Price for the next passenger.
pub async fn fare(
    State(state): State<Arc<AppState>>,
    Path(flight_id): Path<FlightId>,
) -> Result<Json<u64>, RegistryError> {
    state.registry.read().await.fare(flight_id).map(Json)
}

/// GET /flights/{id}/revenue - Revenue collected from booked passengers.
pub async fn revenue(
    State(state): State<Arc<AppState>>,
    Path(flight_id): Path<FlightId>,
) -> Result<Json<u64>, RegistryError> {
    state.registry.read().await.revenue(flight_id).map(Json)
}

/// GET /flights/{id}/origin-airport - Airport the flight takes off from, or null.
pub async fn origin_airport(
    State(state): State<Arc<AppState>>,
    Path(flight_id): Path<FlightId>,
) -> Json<Option<String>> {
    let registry = state.registry.read().await;
    Json(registry.origin_airport_of(flight_id).map(str::to_string))
}

/// GET /airports/{name}/occupancy - Passengers through the airport on a date.
pub async fn occupancy(
    State(state): State<Arc<AppState>>,
    Path(airport_name): Path<String>,
    Query(query): Query<OccupancyQuery>,
) -> Json<u64> {
    Json(state.registry.read().await.occupancy(query.date, &airport_name))
}
