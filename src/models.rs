//! Data models for airports, flights, passengers and booking outcomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a flight.
pub type FlightId = u32;

/// Unique identifier of a passenger.
pub type PassengerId = u32;

/// Opaque city identifier. Cities are only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City(String);

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An airport, keyed by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub city: City,
    pub terminals: u32,
}

/// A scheduled, directed flight between two cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub origin: City,
    pub destination: City,
    /// Maximum number of passengers that may hold a booking.
    pub max_capacity: u32,
    /// Flight time in minutes.
    pub duration: u32,
    pub date: NaiveDate,
}

impl Flight {
    /// True when the flight departs from or arrives at `city`.
    pub fn touches(&self, city: &City) -> bool {
        &self.origin == city || &self.destination == city
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: PassengerId,
}

/// Result of a ticket booking or cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingOutcome {
    Success,
    Failure,
}

impl BookingOutcome {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Entity counts reported by the status endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub airports: usize,
    pub flights: usize,
    pub passengers: usize,
    /// Passengers currently holding a booking.
    pub active_bookings: usize,
}
