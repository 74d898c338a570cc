use crate::domain::model::SlotKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParkingError {
    #[error("Slot {id} not found")]
    SlotNotFound { id: String },

    #[error("Slot {id} is occupied")]
    SlotOccupied { id: String },

    #[error("Slot id {id} is already in use")]
    DuplicateSlotId { id: String },

    #[error("Car {registration} not found")]
    CarNotFound { registration: String },

    #[error("Car {registration} is already parked in slot {slot_id}")]
    DuplicateRegistration {
        registration: String,
        slot_id: String,
    },

    #[error("Slot {slot_id} is a {slot_kind} slot, owner is {owner_kind}")]
    TypeMismatch {
        slot_id: String,
        slot_kind: SlotKind,
        owner_kind: SlotKind,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A slot or car lookup missed.
    NotFound,
    /// The request collides with current state (occupied slot, reused id or registration).
    Conflict,
    /// A parking rule rejected the request.
    Rule,
    /// Bad configuration or input.
    Input,
    System,
}

impl ParkingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParkingError::SlotNotFound { .. } | ParkingError::CarNotFound { .. } => {
                ErrorCategory::NotFound
            }
            ParkingError::SlotOccupied { .. }
            | ParkingError::DuplicateSlotId { .. }
            | ParkingError::DuplicateRegistration { .. } => ErrorCategory::Conflict,
            ParkingError::TypeMismatch { .. } => ErrorCategory::Rule,
            ParkingError::Config { .. } | ParkingError::InvalidValue { .. } => {
                ErrorCategory::Input
            }
            ParkingError::Io(_) => ErrorCategory::System,
        }
    }

    /// Message shown to a person at the menu.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ParkingError::SlotNotFound { id } => format!("Slot {} not found.", id),
            ParkingError::SlotOccupied { id } => format!("Slot {} is already occupied.", id),
            ParkingError::DuplicateSlotId { id } => format!(
                "Failed to add parking slot, parking slot ID {} already in use.",
                id
            ),
            ParkingError::CarNotFound { .. } => "Car not found.".to_string(),
            ParkingError::DuplicateRegistration {
                registration,
                slot_id,
            } => format!(
                "Car {} is already parked in slot {}.",
                registration, slot_id
            ),
            ParkingError::TypeMismatch { .. } => {
                "Failed to park the car. Ensure the slot type matches the car owner type (staff/visitor)."
                    .to_string()
            }
            ParkingError::Config { message } => format!("Configuration problem: {}", message),
            ParkingError::InvalidValue { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            ParkingError::Io(e) => format!("Input/output failure: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParkingError>;
