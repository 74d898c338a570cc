pub mod clock;
pub mod engine;
pub mod fee;
pub mod registry;
pub mod shared;

pub use crate::domain::model::{Car, CarLocation, Occupancy, ParkReceipt, Slot, SlotKind};
pub use crate::domain::ports::{Clock, ConfigProvider};
pub use crate::utils::error::Result;
