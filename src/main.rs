use anyhow::Context;
use carpark::core::ConfigProvider;
use carpark::utils::{logger, validation::Validate};
use carpark::{CarPark, CliConfig, MenuSession, SystemClock};
use clap::Parser;
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting carpark CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {} ({:?})", e, e.category());
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 Check the --config path and that the file is valid TOML");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MenuSession::new(
        stdin.lock(),
        stdout.lock(),
        SystemClock,
        CarPark::from_config(&config),
    );

    if !config.has_slot_counts() {
        let counts = session
            .prompt_slot_counts(config.staff_slots(), config.visitor_slots())
            .context("reading initial slot counts")?;
        match counts {
            Some((staff, visitor)) => session.reseed(staff, visitor),
            None => return Ok(()),
        }
    }

    tracing::info!(
        "✅ {} ready with {} slots, {:?}",
        config.facility_name(),
        session.car_park().registry().len(),
        session.car_park().fee_schedule()
    );

    if let Err(e) = session.run() {
        tracing::error!("❌ Menu session failed: {} ({:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    Ok(())
}
