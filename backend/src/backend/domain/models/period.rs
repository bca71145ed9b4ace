//! backend/src/backend/domain/models/period.rs

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one billing period within the calendar cycle.
///
/// Periods carry no year component and compare by equality only: a record
/// paid in period 5 reads as paid whenever the calendar reports 5 again,
/// however many cycles have elapsed in between. Callers that need ordering
/// across cycle boundaries cannot get it from this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period(pub u32);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps wall-clock time onto billing periods.
///
/// The default cycle is the 12 calendar months (period = month index 0-11).
/// Shorter cycles divide the year proportionally: a 3-period cycle yields
/// school terms, a 4-period cycle yields quarters.
#[derive(Debug, Clone)]
pub struct BillingCalendar {
    periods_per_cycle: u32,
}

impl BillingCalendar {
    /// Calendar-month cycle: periods 0 through 11.
    pub fn monthly() -> Self {
        Self {
            periods_per_cycle: 12,
        }
    }

    /// Custom cycle length, between 1 and 12 periods per year.
    pub fn with_cycle(periods_per_cycle: u32) -> Result<Self> {
        if periods_per_cycle == 0 || periods_per_cycle > 12 {
            return Err(anyhow!(
                "Billing cycle must have between 1 and 12 periods, got {}",
                periods_per_cycle
            ));
        }
        Ok(Self { periods_per_cycle })
    }

    pub fn periods_per_cycle(&self) -> u32 {
        self.periods_per_cycle
    }

    /// The period the local clock currently falls in.
    pub fn current_period(&self) -> Period {
        self.period_for_month(Local::now().month0())
    }

    /// Period a zero-based calendar month belongs to.
    pub fn period_for_month(&self, month0: u32) -> Period {
        Period((month0 % 12) * self.periods_per_cycle / 12)
    }
}

impl Default for BillingCalendar {
    fn default() -> Self {
        Self::monthly()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_cycle_maps_months_to_themselves() {
        let calendar = BillingCalendar::monthly();
        for month in 0..12 {
            assert_eq!(calendar.period_for_month(month), Period(month));
        }
    }

    #[test]
    fn test_term_cycle_groups_four_months_per_period() {
        let calendar = BillingCalendar::with_cycle(3).unwrap();
        assert_eq!(calendar.period_for_month(0), Period(0));
        assert_eq!(calendar.period_for_month(3), Period(0));
        assert_eq!(calendar.period_for_month(4), Period(1));
        assert_eq!(calendar.period_for_month(7), Period(1));
        assert_eq!(calendar.period_for_month(8), Period(2));
        assert_eq!(calendar.period_for_month(11), Period(2));
    }

    #[test]
    fn test_quarter_cycle_groups_three_months_per_period() {
        let calendar = BillingCalendar::with_cycle(4).unwrap();
        assert_eq!(calendar.period_for_month(2), Period(0));
        assert_eq!(calendar.period_for_month(3), Period(1));
        assert_eq!(calendar.period_for_month(11), Period(3));
    }

    #[test]
    fn test_cycle_length_bounds_are_enforced() {
        assert!(BillingCalendar::with_cycle(0).is_err());
        assert!(BillingCalendar::with_cycle(13).is_err());
        assert!(BillingCalendar::with_cycle(1).is_ok());
        assert!(BillingCalendar::with_cycle(12).is_ok());
    }

    #[test]
    fn test_current_period_stays_inside_the_cycle() {
        let calendar = BillingCalendar::monthly();
        assert!(calendar.current_period().0 < calendar.periods_per_cycle());
    }

    #[test]
    fn test_periods_compare_by_equality_only() {
        // Period 11 (December) followed by period 0 (January) are simply
        // different identifiers. Nothing records that a whole cycle may
        // have elapsed between two sightings of the same number.
        assert_ne!(Period(11), Period(0));
        assert_eq!(Period(11), Period(11));
    }
}
