use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a slot, and of the person parking in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Staff,
    Visitor,
}

impl SlotKind {
    /// Letter used when seeding slot ids (`S01`, `V01`).
    pub fn id_prefix(self) -> char {
        match self {
            SlotKind::Staff => 'S',
            SlotKind::Visitor => 'V',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Staff => "staff",
            SlotKind::Visitor => "visitor",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staff" => Ok(SlotKind::Staff),
            "visitor" => Ok(SlotKind::Visitor),
            other => Err(format!("unknown slot type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub registration: String,
    pub owner_name: String,
    pub kind: SlotKind,
    pub parked_at: DateTime<Utc>,
}

impl Car {
    pub fn matches_registration(&self, registration: &str) -> bool {
        self.registration.eq_ignore_ascii_case(registration)
    }
}

/// A parking space. Fields are private: once a slot is held by a
/// [`SlotRegistry`](crate::core::registry::SlotRegistry) only the registry changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    id: String,
    kind: SlotKind,
    occupant: Option<Car>,
}

impl Slot {
    pub(crate) fn new(id: String, kind: SlotKind) -> Self {
        Self {
            id,
            kind,
            occupant: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Car> {
        self.occupant.as_ref()
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Two-digit suffix of a conventional id; `None` for anything else.
    pub fn number(&self) -> Option<u32> {
        self.id.get(1..).and_then(|n| n.parse().ok())
    }

    pub(crate) fn set_occupant(&mut self, car: Car) {
        self.occupant = Some(car);
    }

    pub(crate) fn take_occupant(&mut self) -> Option<Car> {
        self.occupant.take()
    }
}

/// Whole-unit breakdown of a parked duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Result of a successful park.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkReceipt {
    pub slot_id: String,
    pub parked_at: DateTime<Utc>,
}

/// Result of a successful find, priced at the query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarLocation {
    pub slot_id: String,
    pub registration: String,
    pub owner_name: String,
    pub parked_at: DateTime<Utc>,
    pub elapsed: Elapsed,
    pub fee: u64,
}

/// Slot totals per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occupancy {
    pub staff_total: usize,
    pub staff_occupied: usize,
    pub visitor_total: usize,
    pub visitor_occupied: usize,
}

impl Occupancy {
    pub fn total(&self) -> usize {
        self.staff_total + self.visitor_total
    }

    pub fn occupied(&self) -> usize {
        self.staff_occupied + self.visitor_occupied
    }
}
