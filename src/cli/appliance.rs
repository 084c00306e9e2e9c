use clap::Parser;

use crate::{cli::parse_positive, core::optimizer::Appliance, quantity::power::Kilowatts};

#[derive(Copy, Clone, Parser)]
pub struct ApplianceArgs {
    /// Appliance power rating in kilowatts.
    #[clap(
        long = "power-kilowatts",
        env = "POWER_KILOWATTS",
        default_value = "2.0",
        value_parser = parse_positive::<Kilowatts>,
    )]
    power: Kilowatts,

    /// How many whole hours the appliance runs.
    #[clap(
        long = "duration-hours",
        env = "DURATION_HOURS",
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(1..=24),
    )]
    duration_hours: u32,
}

impl From<ApplianceArgs> for Appliance {
    fn from(args: ApplianceArgs) -> Self {
        Self { power: args.power, duration_hours: args.duration_hours }
    }
}
