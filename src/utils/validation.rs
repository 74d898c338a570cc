use crate::utils::error::{ParkingError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Slots are numbered with a two-digit suffix.
pub const MAX_SLOTS_PER_KIND: usize = 99;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn slot_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]\d{2}$").expect("valid slot id regex"))
}

fn registration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]\d{4}$").expect("valid registration regex"))
}

fn owner_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid owner name regex"))
}

/// One letter and two digits, e.g. `S01`. Returns the upper-cased id.
pub fn validate_slot_id(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if !slot_id_pattern().is_match(trimmed) {
        return Err(ParkingError::InvalidValue {
            field: "slot ID".to_string(),
            value: value.to_string(),
            reason: "must be a letter followed by two digits (e.g. S01 or V01)".to_string(),
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// One letter and four digits, e.g. `T2345`. Returns the upper-cased registration.
pub fn validate_registration(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if !registration_pattern().is_match(trimmed) {
        return Err(ParkingError::InvalidValue {
            field: "registration number".to_string(),
            value: value.to_string(),
            reason: "must be a letter followed by four digits (e.g. T2345)".to_string(),
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}

pub fn validate_owner_name(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !owner_name_pattern().is_match(trimmed) {
        return Err(ParkingError::InvalidValue {
            field: "owner name".to_string(),
            value: value.to_string(),
            reason: "must contain only letters and spaces".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ParkingError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ParkingError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("must be at least {}", min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slot_id() {
        assert_eq!(validate_slot_id("s01").unwrap(), "S01");
        assert_eq!(validate_slot_id(" V12 ").unwrap(), "V12");
        assert!(validate_slot_id("S1").is_err());
        assert!(validate_slot_id("S001").is_err());
        assert!(validate_slot_id("101").is_err());
    }

    #[test]
    fn test_validate_registration() {
        assert_eq!(validate_registration("t2345").unwrap(), "T2345");
        assert!(validate_registration("T234").is_err());
        assert!(validate_registration("TT2345").is_err());
        assert!(validate_registration("").is_err());
    }

    #[test]
    fn test_validate_owner_name() {
        assert_eq!(validate_owner_name("  Ada Lovelace ").unwrap(), "Ada Lovelace");
        assert!(validate_owner_name("   ").is_err());
        assert!(validate_owner_name("R2D2").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("facility.staff_slots", 99usize, 0, MAX_SLOTS_PER_KIND).is_ok());
        assert!(validate_range("facility.staff_slots", 100usize, 0, MAX_SLOTS_PER_KIND).is_err());
        assert!(validate_positive_number("billing.rate_per_hour", 0, 1).is_err());
    }
}
