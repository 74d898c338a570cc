use crate::domain::model::Elapsed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RATE_PER_HOUR: u64 = 5;
pub const DEFAULT_BASE_FEE: u64 = 5;

const SECONDS_PER_HOUR: i64 = 3600;

/// Configurable name of a fee formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum FeePolicyKind {
    #[default]
    MinimumHour,
    BasePlusHourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// Every started hour is billed, with at least one hour.
    MinimumHour,
    /// A flat base charge plus each completed hour.
    BasePlusHourly { base: u64 },
}

impl FeePolicy {
    pub fn kind(&self) -> FeePolicyKind {
        match self {
            FeePolicy::MinimumHour => FeePolicyKind::MinimumHour,
            FeePolicy::BasePlusHourly { .. } => FeePolicyKind::BasePlusHourly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub rate_per_hour: u64,
    pub policy: FeePolicy,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rate_per_hour: DEFAULT_RATE_PER_HOUR,
            policy: FeePolicy::MinimumHour,
        }
    }
}

impl FeeSchedule {
    pub fn new(rate_per_hour: u64, policy: FeePolicy) -> Self {
        Self {
            rate_per_hour,
            policy,
        }
    }

    /// Hours charged for a stay of `elapsed_seconds`.
    pub fn billable_hours(&self, elapsed_seconds: i64) -> u64 {
        let seconds = elapsed_seconds.max(0);
        match self.policy {
            FeePolicy::MinimumHour => {
                let started = (seconds + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR;
                started.max(1) as u64
            }
            FeePolicy::BasePlusHourly { .. } => (seconds / SECONDS_PER_HOUR) as u64,
        }
    }

    pub fn fee_for_seconds(&self, elapsed_seconds: i64) -> u64 {
        let hourly = self
            .billable_hours(elapsed_seconds)
            .saturating_mul(self.rate_per_hour);
        match self.policy {
            FeePolicy::MinimumHour => hourly,
            FeePolicy::BasePlusHourly { base } => base.saturating_add(hourly),
        }
    }

    pub fn fee(&self, parked_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
        self.fee_for_seconds(elapsed_seconds(parked_at, now))
    }
}

/// Seconds between parking and `now`; a clock that went backwards counts as zero.
pub fn elapsed_seconds(parked_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - parked_at).num_seconds().max(0)
}

pub fn elapsed(parked_at: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let total = elapsed_seconds(parked_at, now);
    Elapsed {
        hours: total / SECONDS_PER_HOUR,
        minutes: (total % SECONDS_PER_HOUR) / 60,
        seconds: total % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 4, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_minimum_hour_billing() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.fee(t0(), t0()), 5);
        assert_eq!(fees.fee(t0(), t0() + Duration::minutes(59)), 5);
        assert_eq!(fees.fee(t0(), t0() + Duration::minutes(60)), 5);
        assert_eq!(fees.fee(t0(), t0() + Duration::minutes(61)), 10);
        assert_eq!(fees.fee(t0(), t0() + Duration::minutes(90)), 10);
        assert_eq!(fees.fee(t0(), t0() + Duration::hours(5)), 25);
    }

    #[test]
    fn test_fee_never_decreases() {
        let fees = FeeSchedule::new(7, FeePolicy::MinimumHour);
        let mut previous = 0;
        for minutes in (0..600).step_by(7) {
            let fee = fees.fee(t0(), t0() + Duration::minutes(minutes));
            assert!(fee >= previous);
            assert!(fee >= 7);
            previous = fee;
        }
    }

    #[test]
    fn test_base_plus_hourly() {
        let fees = FeeSchedule::new(5, FeePolicy::BasePlusHourly { base: 5 });
        assert_eq!(fees.fee(t0(), t0() + Duration::minutes(30)), 5);
        assert_eq!(fees.fee(t0(), t0() + Duration::minutes(90)), 10);
        assert_eq!(fees.fee(t0(), t0() + Duration::hours(3)), 20);
    }

    #[test]
    fn test_clock_going_backwards() {
        let fees = FeeSchedule::default();
        let earlier = t0() - Duration::minutes(10);
        assert_eq!(elapsed(t0(), earlier), Elapsed::default());
        assert_eq!(fees.fee(t0(), earlier), 5);
    }

    #[test]
    fn test_elapsed_breakdown() {
        let e = elapsed(t0(), t0() + Duration::seconds(2 * 3600 + 5 * 60 + 9));
        assert_eq!(
            e,
            Elapsed {
                hours: 2,
                minutes: 5,
                seconds: 9
            }
        );
        assert_eq!(e.total_seconds(), 7509);
    }
}
