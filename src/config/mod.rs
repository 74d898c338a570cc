pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::fee::FeePolicyKind;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::CarParkConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "carpark")]
#[command(about = "Text menu for a staff/visitor car park")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of staff slots to create (S01..)
    #[arg(long)]
    pub staff_slots: Option<usize>,

    /// Number of visitor slots to create (V01..)
    #[arg(long)]
    pub visitor_slots: Option<usize>,

    /// Fee per hour
    #[arg(long)]
    pub rate: Option<u64>,

    #[arg(long, value_enum)]
    pub fee_policy: Option<FeePolicyKind>,

    /// Base charge for the base-plus-hourly policy
    #[arg(long)]
    pub base_fee: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command line values win over the file.
    pub fn apply_overrides(&self, config: &mut CarParkConfig) {
        if let Some(staff) = self.staff_slots {
            config.facility.staff_slots = Some(staff);
        }
        if let Some(visitor) = self.visitor_slots {
            config.facility.visitor_slots = Some(visitor);
        }
        if let Some(rate) = self.rate {
            config.billing.rate_per_hour = rate;
        }
        if let Some(policy) = self.fee_policy {
            config.billing.policy = policy;
        }
        if let Some(base) = self.base_fee {
            config.billing.base_fee = Some(base);
        }
    }

    pub fn resolve(&self) -> crate::utils::error::Result<CarParkConfig> {
        let mut config = match &self.config {
            Some(path) => CarParkConfig::from_file(path)?,
            None => CarParkConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::fee::{FeePolicy, FeeSchedule};
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = CarParkConfig::from_toml_str(
            "[facility]\nstaff_slots = 2\nvisitor_slots = 2\n[billing]\nrate_per_hour = 3\n",
        )
        .unwrap();
        let cli = CliConfig::parse_from([
            "carpark",
            "--visitor-slots",
            "9",
            "--fee-policy",
            "base-plus-hourly",
            "--base-fee",
            "1",
        ]);
        cli.apply_overrides(&mut config);

        assert_eq!(config.staff_slots(), Some(2));
        assert_eq!(config.visitor_slots(), Some(9));
        assert_eq!(
            config.fee_schedule(),
            FeeSchedule::new(3, FeePolicy::BasePlusHourly { base: 1 })
        );
    }

    #[test]
    fn test_resolve_without_file() {
        let cli = CliConfig::parse_from(["carpark", "--staff-slots", "1", "--rate", "6"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.staff_slots(), Some(1));
        assert_eq!(config.visitor_slots(), None);
        assert_eq!(config.billing.rate_per_hour, 6);
    }

    #[test]
    fn test_resolve_missing_file_is_io_error() {
        let cli = CliConfig::parse_from(["carpark", "--config", "/nonexistent/carpark.toml"]);
        assert!(matches!(
            cli.resolve(),
            Err(crate::utils::error::ParkingError::Io(_))
        ));
    }
}
