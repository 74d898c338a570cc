use crate::core::fee::FeeSchedule;
use chrono::{DateTime, Utc};

/// Source of the current time for front ends.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub trait ConfigProvider {
    /// Staff slots to seed at startup, if known.
    fn staff_slots(&self) -> Option<usize>;
    /// Visitor slots to seed at startup, if known.
    fn visitor_slots(&self) -> Option<usize>;
    fn fee_schedule(&self) -> FeeSchedule;
}
