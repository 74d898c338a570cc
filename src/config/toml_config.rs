use crate::core::fee::{
    FeePolicy, FeePolicyKind, FeeSchedule, DEFAULT_BASE_FEE, DEFAULT_RATE_PER_HOUR,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ParkingError, Result};
use crate::utils::validation::{self, Validate, MAX_SLOTS_PER_KIND};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarParkConfig {
    #[serde(default)]
    pub facility: FacilityConfig,
    #[serde(default)]
    pub billing: BillingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_slots: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_slots: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default = "default_rate_per_hour")]
    pub rate_per_hour: u64,
    #[serde(default)]
    pub policy: FeePolicyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<u64>,
}

fn default_rate_per_hour() -> u64 {
    DEFAULT_RATE_PER_HOUR
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            rate_per_hour: DEFAULT_RATE_PER_HOUR,
            policy: FeePolicyKind::default(),
            base_fee: None,
        }
    }
}

impl CarParkConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after substituting `${VAR}` references.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ParkingError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ParkingError::Config {
            message: format!("TOML serialization error: {}", e),
        })
    }

    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(staff) = self.facility.staff_slots {
            validation::validate_range("facility.staff_slots", staff, 0, MAX_SLOTS_PER_KIND)?;
        }
        if let Some(visitor) = self.facility.visitor_slots {
            validation::validate_range("facility.visitor_slots", visitor, 0, MAX_SLOTS_PER_KIND)?;
        }
        validation::validate_positive_number("billing.rate_per_hour", self.billing.rate_per_hour, 1)?;

        if self.billing.base_fee.is_some() && self.billing.policy != FeePolicyKind::BasePlusHourly {
            tracing::warn!("billing.base_fee is ignored by the minimum-hour policy");
        }

        Ok(())
    }

    pub fn has_slot_counts(&self) -> bool {
        self.facility.staff_slots.is_some() && self.facility.visitor_slots.is_some()
    }

    pub fn facility_name(&self) -> &str {
        self.facility.name.as_deref().unwrap_or("Car park")
    }
}

impl ConfigProvider for CarParkConfig {
    fn staff_slots(&self) -> Option<usize> {
        self.facility.staff_slots
    }

    fn visitor_slots(&self) -> Option<usize> {
        self.facility.visitor_slots
    }

    fn fee_schedule(&self) -> FeeSchedule {
        let policy = match self.billing.policy {
            FeePolicyKind::MinimumHour => FeePolicy::MinimumHour,
            FeePolicyKind::BasePlusHourly => FeePolicy::BasePlusHourly {
                base: self.billing.base_fee.unwrap_or(DEFAULT_BASE_FEE),
            },
        };
        FeeSchedule::new(self.billing.rate_per_hour, policy)
    }
}

impl Validate for CarParkConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
