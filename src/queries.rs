//! Read-only aggregations over the registry.

use chrono::NaiveDate;

use crate::error::RegistryError;
use crate::models::{City, FlightId};
use crate::registry::BookingRegistry;

/// Price paid by the first passenger on any flight.
pub const BASE_FARE: u64 = 3000;

/// Price increase for every passenger already booked.
pub const FARE_STEP: u64 = 50;

impl BookingRegistry {
    /// Name of the airport with the most terminals.
    ///
    /// Ties go to the lexicographically smallest name. `None` when no airports
    /// are registered.
    pub fn largest_airport(&self) -> Option<&str> {
        // Airports iterate in name order, so only a strict improvement may
        // replace the current winner.
        let mut largest: Option<(&str, u32)> = None;
        for (name, airport) in &self.airports {
            match largest {
                Some((_, terminals)) if airport.terminals <= terminals => {}
                _ => largest = Some((name.as_str(), airport.terminals)),
            }
        }
        largest.map(|(name, _)| name)
    }

    /// Shortest duration among flights going directly from `from` to `to`.
    pub fn shortest_direct_duration(&self, from: &City, to: &City) -> Option<u32> {
        self.flights
            .values()
            .filter(|flight| &flight.origin == from && &flight.destination == to)
            .map(|flight| flight.duration)
            .min()
    }

    /// Price the next passenger would pay: `3000 + 50 * booked`.
    pub fn fare(&self, flight_id: FlightId) -> Result<u64, RegistryError> {
        let booked = self.booked_passengers(flight_id)?;
        Ok(BASE_FARE + FARE_STEP * booked)
    }

    /// Sum of the fares paid by everyone currently booked on the flight.
    ///
    /// The n-th passenger paid `3000 + 50 * (n - 1)`, so for `n` passengers
    /// the total is `3000n + 50n(n-1)/2`.
    pub fn revenue(&self, flight_id: FlightId) -> Result<u64, RegistryError> {
        let n = self.booked_passengers(flight_id)?;
        Ok(BASE_FARE * n + FARE_STEP * n * n.saturating_sub(1) / 2)
    }

    /// Passengers on flights through the airport's city on `date`.
    ///
    /// Unknown airports have no occupancy.
    pub fn occupancy(&self, date: NaiveDate, airport_name: &str) -> u64 {
        self.airport(airport_name)
            .map_or(0, |airport| self.occupancy_for_city(&airport.city, date))
    }

    /// Name of the airport the flight takes off from.
    ///
    /// When several airports serve the origin city the lexicographically
    /// smallest name is returned.
    pub fn origin_airport_of(&self, flight_id: FlightId) -> Option<&str> {
        let origin = &self.flight(flight_id)?.origin;
        self.airports
            .values()
            .find(|airport| &airport.city == origin)
            .map(|airport| airport.name.as_str())
    }

    fn booked_passengers(&self, flight_id: FlightId) -> Result<u64, RegistryError> {
        self.passengers_on(flight_id)
            .map(u64::from)
            .ok_or(RegistryError::FlightNotFound(flight_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Passenger;
    use crate::registry::tests::{airport, date, flight};

    fn booked_registry(capacity: u32, passengers: u32) -> BookingRegistry {
        let mut registry = BookingRegistry::new();
        registry.register_flight(flight(1, "DELHI", "MUMBAI", capacity));
        for id in 1..=passengers {
            registry.register_passenger(Passenger { id });
            registry.book_ticket(1, id);
        }
        registry
    }

    mod fare_tests {
        use super::*;

        #[test]
        fn test_fare_empty_flight() {
            assert_eq!(booked_registry(10, 0).fare(1), Ok(3000));
        }

        #[test]
        fn test_fare_after_two_bookings() {
            assert_eq!(booked_registry(10, 2).fare(1), Ok(3100));
        }

        #[test]
        fn test_fare_unknown_flight() {
            assert_eq!(
                BookingRegistry::new().fare(5),
                Err(RegistryError::FlightNotFound(5))
            );
        }

        #[test]
        fn test_book_then_cancel_restores_fare() {
            let mut registry = booked_registry(10, 2);
            registry.register_passenger(Passenger { id: 50 });
            let before = (registry.fare(1), registry.passengers_on(1));
            assert!(registry.book_ticket(1, 50).is_success());
            assert_eq!(registry.fare(1), Ok(3150));
            assert!(registry.cancel_ticket(1, 50).is_success());
            assert_eq!((registry.fare(1), registry.passengers_on(1)), before);
        }
    }

    mod revenue_tests {
        use super::*;

        #[test]
        fn test_revenue_empty_flight() {
            assert_eq!(booked_registry(10, 0).revenue(1), Ok(0));
        }

        #[test]
        fn test_revenue_single_passenger() {
            assert_eq!(booked_registry(10, 1).revenue(1), Ok(3000));
        }

        #[test]
        fn test_revenue_three_passengers() {
            assert_eq!(booked_registry(10, 3).revenue(1), Ok(9150));
        }

        #[test]
        fn test_revenue_reflects_cancellation() {
            let mut registry = booked_registry(10, 3);
            registry.cancel_ticket(1, 2);
            assert_eq!(registry.revenue(1), Ok(6050));
        }

        #[test]
        fn test_revenue_unknown_flight() {
            assert_eq!(
                BookingRegistry::new().revenue(9),
                Err(RegistryError::FlightNotFound(9))
            );
        }
    }

    mod largest_airport_tests {
        use super::*;

        #[test]
        fn test_no_airports() {
            assert_eq!(BookingRegistry::new().largest_airport(), None);
        }

        #[test]
        fn test_tie_prefers_smaller_name() {
            let mut registry = BookingRegistry::new();
            registry.register_airport(airport("C", "CHENNAI", 3));
            registry.register_airport(airport("A", "AGRA", 2));
            registry.register_airport(airport("B", "BANGALORE", 3));
            assert_eq!(registry.largest_airport(), Some("B"));
        }

        #[test]
        fn test_strictly_larger_wins() {
            let mut registry = BookingRegistry::new();
            registry.register_airport(airport("AAA", "AGRA", 1));
            registry.register_airport(airport("ZZZ", "DELHI", 4));
            assert_eq!(registry.largest_airport(), Some("ZZZ"));
        }

        #[test]
        fn test_zero_terminal_airport_still_counts() {
            let mut registry = BookingRegistry::new();
            registry.register_airport(airport("HELIPAD", "AGRA", 0));
            assert_eq!(registry.largest_airport(), Some("HELIPAD"));
        }
    }

    mod shortest_duration_tests {
        use super::*;

        #[test]
        fn test_no_direct_flight() {
            let registry = booked_registry(10, 0);
            assert_eq!(
                registry.shortest_direct_duration(&City::new("MUMBAI"), &City::new("DELHI")),
                None
            );
        }

        #[test]
        fn test_picks_minimum() {
            let mut registry = BookingRegistry::new();
            registry.register_flight(flight(1, "DELHI", "MUMBAI", 10));
            let mut faster = flight(2, "DELHI", "MUMBAI", 10);
            faster.duration = 90;
            registry.register_flight(faster);
            let mut other_route = flight(3, "DELHI", "CHENNAI", 10);
            other_route.duration = 30;
            registry.register_flight(other_route);
            assert_eq!(
                registry.shortest_direct_duration(&City::new("DELHI"), &City::new("MUMBAI")),
                Some(90)
            );
        }
    }

    mod occupancy_tests {
        use super::*;

        #[test]
        fn test_unknown_airport() {
            assert_eq!(BookingRegistry::new().occupancy(date(1), "NOWHERE"), 0);
        }

        #[test]
        fn test_no_flights_on_date() {
            let mut registry = booked_registry(10, 3);
            registry.register_airport(airport("IGI", "DELHI", 3));
            assert_eq!(registry.occupancy(date(2), "IGI"), 0);
        }

        #[test]
        fn test_counts_both_directions() {
            let mut registry = BookingRegistry::new();
            registry.register_airport(airport("IGI", "DELHI", 3));
            registry.register_flight(flight(1, "DELHI", "MUMBAI", 10));
            registry.register_flight(flight(2, "CHENNAI", "DELHI", 10));
            registry.register_flight(flight(3, "CHENNAI", "MUMBAI", 10));
            for id in 1..=6 {
                registry.register_passenger(Passenger { id });
            }
            for id in 1..=3 {
                registry.book_ticket(1, id);
            }
            registry.book_ticket(2, 4);
            registry.book_ticket(2, 5);
            registry.book_ticket(3, 6);
            assert_eq!(registry.occupancy(date(1), "IGI"), 5);
        }
    }

    mod origin_airport_tests {
        use super::*;

        #[test]
        fn test_resolves_by_origin_city() {
            let mut registry = booked_registry(10, 0);
            registry.register_airport(airport("CSM", "MUMBAI", 2));
            registry.register_airport(airport("IGI", "DELHI", 3));
            assert_eq!(registry.origin_airport_of(1), Some("IGI"));
        }

        #[test]
        fn test_shared_city_prefers_smaller_name() {
            let mut registry = booked_registry(10, 0);
            registry.register_airport(airport("SAFDARJUNG", "DELHI", 1));
            registry.register_airport(airport("IGI", "DELHI", 3));
            assert_eq!(registry.origin_airport_of(1), Some("IGI"));
        }

        #[test]
        fn test_unknown_flight_or_city() {
            let mut registry = booked_registry(10, 0);
            assert_eq!(registry.origin_airport_of(1), None);
            registry.register_airport(airport("IGI", "DELHI", 3));
            assert_eq!(registry.origin_airport_of(2), None);
        }
    }
}
