//! Fare calculation: time-based pricing with a free tier and a loyalty
//! discount.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::money::{fractional_hours, round2};
use crate::domain::{Ticket, VehicleType};
use crate::error::ParkingError;

/// Hourly rates and fare rules.
///
/// Loaded from configuration; [`FareSchedule::default`] carries the
/// standard tariff (car 1.50/h, bike 1.00/h, 5 % loyalty discount, first
/// 30 minutes free).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FareSchedule {
    /// Hourly rate for cars.
    pub car_rate_per_hour: Decimal,
    /// Hourly rate for bikes.
    pub bike_rate_per_hour: Decimal,
    /// Multiplier applied to the hourly rate for returning customers.
    pub recurring_user_discount: Decimal,
    /// Stays shorter than this many minutes are free.
    pub free_minutes: u32,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            car_rate_per_hour: Decimal::new(15, 1),
            bike_rate_per_hour: Decimal::ONE,
            recurring_user_discount: Decimal::new(95, 2),
            free_minutes: 30,
        }
    }
}

impl FareSchedule {
    /// Undiscounted hourly rate for a vehicle type.
    #[must_use]
    pub const fn base_rate(&self, vehicle_type: VehicleType) -> Decimal {
        match vehicle_type {
            VehicleType::Car => self.car_rate_per_hour,
            VehicleType::Bike => self.bike_rate_per_hour,
        }
    }

    /// Free-tier threshold expressed in hours.
    #[must_use]
    pub fn free_threshold_hours(&self) -> Decimal {
        Decimal::from(self.free_minutes) / Decimal::from(60)
    }
}

/// Prices closed tickets according to a [`FareSchedule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FareCalculator {
    schedule: FareSchedule,
}

impl FareCalculator {
    /// Creates a calculator for the given schedule.
    #[must_use]
    pub const fn new(schedule: FareSchedule) -> Self {
        Self { schedule }
    }

    /// The schedule this calculator prices with.
    #[must_use]
    pub const fn schedule(&self) -> &FareSchedule {
        &self.schedule
    }

    fn effective_rate(&self, vehicle_type: VehicleType, apply_discount: bool) -> Decimal {
        let rate = self.schedule.base_rate(vehicle_type);
        if apply_discount {
            rate * self.schedule.recurring_user_discount
        } else {
            rate
        }
    }

    /// Hourly rate for display, rounded to two places.
    #[must_use]
    pub fn hourly_rate(&self, vehicle_type: VehicleType, apply_discount: bool) -> Decimal {
        round2(self.effective_rate(vehicle_type, apply_discount))
    }

    /// Computes the price of a closed ticket.
    ///
    /// Stays under the free threshold cost nothing. Longer stays cost the
    /// fractional number of hours times the hourly rate (discounted first
    /// when `apply_discount` is set), rounded half-up once at the end.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] if the ticket has no exit
    /// time or exits before it entered.
    pub fn calculate_fare(
        &self,
        ticket: &Ticket,
        apply_discount: bool,
    ) -> Result<Decimal, ParkingError> {
        let hours = fractional_hours(ticket.stay_duration()?);
        if hours < self.schedule.free_threshold_hours() {
            return Ok(Decimal::ZERO);
        }
        let rate = self.effective_rate(ticket.spot.vehicle_type, apply_discount);
        Ok(round2(hours * rate))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{ParkingSpot, SpotId};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap_or_default()
    }

    fn ticket(vehicle_type: VehicleType, minutes: i64) -> Ticket {
        let Some(in_time) = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single() else {
            panic!("valid timestamp");
        };
        let spot = ParkingSpot::new(SpotId::new(1), vehicle_type, false);
        let mut ticket = Ticket::open(spot, "AB-123-CD".to_string(), in_time);
        ticket.out_time = Some(in_time + Duration::minutes(minutes));
        ticket
    }

    fn fare(vehicle_type: VehicleType, minutes: i64, discount: bool) -> Decimal {
        let calculator = FareCalculator::default();
        let Ok(price) = calculator.calculate_fare(&ticket(vehicle_type, minutes), discount) else {
            panic!("fare should be computable");
        };
        price
    }

    #[test]
    fn one_hour_car() {
        assert_eq!(fare(VehicleType::Car, 60, false), dec("1.5"));
    }

    #[test]
    fn one_hour_bike() {
        assert_eq!(fare(VehicleType::Bike, 60, false), dec("1"));
    }

    #[test]
    fn forty_five_minutes_is_prorated() {
        assert_eq!(fare(VehicleType::Bike, 45, false), dec("0.75"));
        assert_eq!(fare(VehicleType::Car, 45, false), dec("1.13"));
    }

    #[test]
    fn full_day_car() {
        assert_eq!(fare(VehicleType::Car, 24 * 60, false), dec("36"));
    }

    #[test]
    fn under_thirty_minutes_is_free_even_with_discount() {
        for vt in VehicleType::ALL {
            assert_eq!(fare(vt, 29, false), Decimal::ZERO);
            assert_eq!(fare(vt, 29, true), Decimal::ZERO);
            assert_eq!(fare(vt, 0, false), Decimal::ZERO);
        }
    }

    #[test]
    fn exactly_thirty_minutes_is_charged() {
        assert_eq!(fare(VehicleType::Car, 30, false), dec("0.75"));
    }

    #[test]
    fn discount_applies_to_rate_and_rounds_half_up() {
        assert_eq!(fare(VehicleType::Car, 60, true), dec("1.43"));
        assert_eq!(fare(VehicleType::Bike, 60, true), dec("0.95"));
    }

    #[test]
    fn total_is_rounded_once_not_per_rate() {
        // 2h at 1.425/h = 2.85; rounding the rate first would give 2.86.
        assert_eq!(fare(VehicleType::Car, 120, true), dec("2.85"));
    }

    #[test]
    fn standalone_hourly_rate_is_rounded() {
        let calculator = FareCalculator::default();
        assert_eq!(calculator.hourly_rate(VehicleType::Car, true), dec("1.43"));
        assert_eq!(calculator.hourly_rate(VehicleType::Car, false), dec("1.5"));
    }

    #[test]
    fn missing_exit_time_is_invalid_input() {
        let mut t = ticket(VehicleType::Car, 60);
        t.out_time = None;
        let result = FareCalculator::default().calculate_fare(&t, false);
        assert!(matches!(result, Err(ParkingError::InvalidInput(_))));
    }

    #[test]
    fn exit_before_entry_is_invalid_input() {
        let t = ticket(VehicleType::Bike, -60);
        let result = FareCalculator::default().calculate_fare(&t, false);
        assert!(matches!(result, Err(ParkingError::InvalidInput(_))));
    }

    #[test]
    fn custom_schedule_is_used() {
        let calculator = FareCalculator::new(FareSchedule {
            car_rate_per_hour: dec("3"),
            bike_rate_per_hour: dec("2"),
            recurring_user_discount: dec("0.5"),
            free_minutes: 0,
        });
        let Ok(price) = calculator.calculate_fare(&ticket(VehicleType::Car, 10), true) else {
            panic!("fare should be computable");
        };
        assert_eq!(price, dec("0.25"));
    }
}
