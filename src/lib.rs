//! In-memory flight booking registry.
//!
//! [`BookingRegistry`] owns airports, flights, passengers and the bookings
//! linking them. The [`handlers`] module exposes it over HTTP.

pub mod error;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod registry;
pub mod state;

pub use error::RegistryError;
pub use models::{Airport, BookingOutcome, City, Flight, FlightId, Passenger, PassengerId};
pub use registry::BookingRegistry;
