//! The booking registry: entity store, derived indexes and booking ledger.
//!
//! Read-only aggregations live in [`crate::queries`].

use chrono::NaiveDate;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use crate::models::{Airport, BookingOutcome, City, Flight, FlightId, Passenger, PassengerId, Stats};

/// In-memory registry of airports, flights, passengers and their bookings.
///
/// Airports are kept ordered by name so that every scan over them is
/// deterministic.
#[derive(Debug, Default)]
pub struct BookingRegistry {
    pub(crate) airports: BTreeMap<String, Airport>,
    pub(crate) flights: HashMap<FlightId, Flight>,
    passengers: HashMap<PassengerId, Passenger>,

    // Index layer. City lists are append-only.
    flights_by_origin: HashMap<City, Vec<FlightId>>,
    flights_by_destination: HashMap<City, Vec<FlightId>>,
    pub(crate) passenger_count_by_flight: HashMap<FlightId, u32>,

    // Booking ledger.
    booked_flight_by_passenger: HashMap<PassengerId, FlightId>,
    booking_count_by_passenger: HashMap<PassengerId, u32>,
}

impl BookingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an airport, replacing any airport with the same name.
    pub fn register_airport(&mut self, airport: Airport) {
        info!(name = %airport.name, city = %airport.city, terminals = airport.terminals, "airport registered");
        if let Some(previous) = self.airports.insert(airport.name.clone(), airport) {
            warn!(name = %previous.name, "airport re-registered, previous record replaced");
        }
    }

    /// Inserts a flight and seeds its indexes.
    ///
    /// Re-registering an id resets its passenger count to zero.
    pub fn register_flight(&mut self, flight: Flight) {
        let id = flight.id;
        self.flights_by_origin
            .entry(flight.origin.clone())
            .or_default()
            .push(id);
        self.flights_by_destination
            .entry(flight.destination.clone())
            .or_default()
            .push(id);
        if self.passenger_count_by_flight.insert(id, 0).is_some() {
            warn!(flight_id = id, "flight re-registered, passenger count reset");
        }
        info!(
            flight_id = id,
            origin = %flight.origin,
            destination = %flight.destination,
            max_capacity = flight.max_capacity,
            date = %flight.date,
            "flight registered"
        );
        self.flights.insert(id, flight);
    }

    /// Inserts a passenger with a zero booking counter.
    pub fn register_passenger(&mut self, passenger: Passenger) {
        let id = passenger.id;
        if self.booking_count_by_passenger.insert(id, 0).is_some() {
            warn!(passenger_id = id, "passenger re-registered, booking count reset");
        }
        self.passengers.insert(id, passenger);
        info!(passenger_id = id, "passenger registered");
    }

    pub fn airport(&self, name: &str) -> Option<&Airport> {
        self.airports.get(name)
    }

    pub fn flight(&self, id: FlightId) -> Option<&Flight> {
        self.flights.get(&id)
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(&id)
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            airports: self.airport_count(),
            flights: self.flight_count(),
            passengers: self.passenger_count(),
            active_bookings: self.booked_flight_by_passenger.len(),
        }
    }

    /// Number of passengers currently booked on a flight.
    pub fn passengers_on(&self, flight_id: FlightId) -> Option<u32> {
        self.passenger_count_by_flight.get(&flight_id).copied()
    }

    /// Total passengers on flights departing from or arriving at `city` on `date`.
    ///
    /// A flight whose origin and destination are both `city` is counted once.
    pub fn occupancy_for_city(&self, city: &City, date: NaiveDate) -> u64 {
        let outbound = self.flights_by_origin.get(city).into_iter().flatten();
        let inbound = self.flights_by_destination.get(city).into_iter().flatten();

        outbound
            .chain(inbound)
            .unique()
            .filter_map(|id| self.flights.get(id))
            .filter(|flight| flight.date == date && flight.touches(city))
            .map(|flight| u64::from(self.passengers_on(flight.id).unwrap_or(0)))
            .sum()
    }

    /// Books `passenger_id` onto `flight_id`.
    ///
    /// Fails when the flight or passenger is unknown, the flight is full, or
    /// the passenger already holds a booking on any flight.
    pub fn book_ticket(&mut self, flight_id: FlightId, passenger_id: PassengerId) -> BookingOutcome {
        let Some(flight) = self.flights.get(&flight_id) else {
            debug!(flight_id, passenger_id, "booking rejected: unknown flight");
            return BookingOutcome::Failure;
        };
        if !self.passengers.contains_key(&passenger_id) {
            debug!(flight_id, passenger_id, "booking rejected: unknown passenger");
            return BookingOutcome::Failure;
        }
        let booked = self.passengers_on(flight_id).unwrap_or(0);
        if booked >= flight.max_capacity {
            debug!(flight_id, passenger_id, booked, "booking rejected: flight full");
            return BookingOutcome::Failure;
        }
        if let Some(current) = self.booked_flight_by_passenger.get(&passenger_id) {
            debug!(
                flight_id,
                passenger_id,
                current_flight = *current,
                "booking rejected: passenger already booked"
            );
            return BookingOutcome::Failure;
        }

        self.booked_flight_by_passenger.insert(passenger_id, flight_id);
        *self.booking_count_by_passenger.entry(passenger_id).or_insert(0) += 1;
        *self.passenger_count_by_flight.entry(flight_id).or_insert(0) += 1;
        info!(flight_id, passenger_id, booked = booked + 1, "ticket booked");
        BookingOutcome::Success
    }

    /// Cancels the booking `passenger_id` holds on `flight_id`.
    ///
    /// Fails without touching any state unless the passenger's active booking
    /// is exactly that flight.
    pub fn cancel_ticket(&mut self, flight_id: FlightId, passenger_id: PassengerId) -> BookingOutcome {
        if self.booked_flight(passenger_id) != Some(flight_id) {
            debug!(flight_id, passenger_id, "cancellation rejected: no matching booking");
            return BookingOutcome::Failure;
        }

        self.booked_flight_by_passenger.remove(&passenger_id);
        if let Some(count) = self.booking_count_by_passenger.get_mut(&passenger_id) {
            *count = count.saturating_sub(1);
        }
        if let Some(count) = self.passenger_count_by_flight.get_mut(&flight_id) {
            *count = count.saturating_sub(1);
        }
        info!(flight_id, passenger_id, "ticket cancelled");
        BookingOutcome::Success
    }

    /// Flight the passenger currently holds a booking on, if any.
    pub fn booked_flight(&self, passenger_id: PassengerId) -> Option<FlightId> {
        self.booked_flight_by_passenger.get(&passenger_id).copied()
    }

    /// Bookings made by a passenger, net of cancellations. Zero for unknown ids.
    pub fn booking_count(&self, passenger_id: PassengerId) -> u32 {
        self.booking_count_by_passenger
            .get(&passenger_id)
            .copied()
            .unwrap_or(0)
    }
}
