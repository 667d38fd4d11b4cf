//! Per-connection subscription manager.
//!
//! Tracks which vehicle types a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::VehicleType;

/// Manages the set of vehicle-type subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed vehicle types. If `subscribe_all` is true, this set is ignored.
    vehicle_types: HashSet<VehicleType>,
    /// Whether the client subscribes to everything (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds vehicle types to the subscription set. `wildcard` enables all.
    pub fn subscribe(&mut self, types: &[VehicleType], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.vehicle_types.extend(types.iter().copied());
    }

    /// Removes vehicle types from the subscription set. `wildcard` clears
    /// everything, including the wildcard itself.
    pub fn unsubscribe(&mut self, types: &[VehicleType], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
            self.vehicle_types.clear();
            return;
        }
        for vehicle_type in types {
            self.vehicle_types.remove(vehicle_type);
        }
    }

    /// Returns `true` if events for `vehicle_type` pass the filter.
    #[must_use]
    pub fn matches(&self, vehicle_type: VehicleType) -> bool {
        self.subscribe_all || self.vehicle_types.contains(&vehicle_type)
    }

    /// Returns the number of explicitly subscribed vehicle types.
    #[must_use]
    pub fn count(&self) -> usize {
        self.vehicle_types.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(VehicleType::Car));
        assert!(!mgr.matches(VehicleType::Bike));
    }

    #[test]
    fn subscribe_specific_type() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[VehicleType::Bike], false);
        assert!(mgr.matches(VehicleType::Bike));
        assert!(!mgr.matches(VehicleType::Car));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(VehicleType::Car));
        assert!(mgr.matches(VehicleType::Bike));
        assert_eq!(mgr.count(), 0);
    }

    #[test]
    fn unsubscribe_removes_type() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&VehicleType::ALL, false);
        mgr.unsubscribe(&[VehicleType::Car], false);
        assert!(!mgr.matches(VehicleType::Car));
        assert!(mgr.matches(VehicleType::Bike));
        assert_eq!(mgr.count(), 1);
    }

    #[test]
    fn wildcard_unsubscribe_clears_all() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[VehicleType::Car], true);
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(!mgr.matches(VehicleType::Car));
    }
}
