pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::menu::MenuSession;
pub use config::toml_config::CarParkConfig;
pub use crate::core::{
    clock::{ManualClock, SystemClock},
    engine::CarPark,
    fee::{FeePolicy, FeeSchedule},
    registry::SlotRegistry,
    shared::SharedCarPark,
};
pub use domain::model::{Car, CarLocation, Occupancy, ParkReceipt, Slot, SlotKind};
pub use utils::error::{ParkingError, Result};
