use clap::Parser;

use crate::{
    cli::parse_positive,
    core::optimizer::Fuel,
    quantity::fuel::{LiterPrice, LitersPer100Km},
};

#[derive(Copy, Clone, Parser)]
pub struct FuelArgs {
    /// Fuel price per liter in the local currency.
    #[clap(
        long = "fuel-price-per-liter",
        env = "FUEL_PRICE_PER_LITER",
        default_value = "6.50",
        value_parser = parse_positive::<LiterPrice>,
    )]
    price: LiterPrice,

    /// Vehicle consumption in liters per 100 kilometers.
    #[clap(
        long = "fuel-liters-per-100km",
        env = "FUEL_LITERS_PER_100KM",
        default_value = "7.0",
        value_parser = parse_positive::<LitersPer100Km>,
    )]
    consumption: LitersPer100Km,
}

impl From<FuelArgs> for Fuel {
    fn from(args: FuelArgs) -> Self {
        Self { price: args.price, consumption: args.consumption }
    }
}
