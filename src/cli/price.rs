use clap::Parser;

use crate::{
    cli::parse_positive,
    core::table::{KILOWATT_HOURS_PER_MEGAWATT_HOUR, PriceConversion},
    quantity::price::{ExchangeRate, KilowattHourPrice},
};

#[derive(Clone, Parser)]
pub struct PriceArgs {
    /// Local currency units per euro.
    #[clap(
        long = "exchange-rate",
        env = "EXCHANGE_RATE",
        default_value = "4.30",
        value_parser = parse_positive::<ExchangeRate>,
    )]
    exchange_rate: ExchangeRate,

    /// Kilowatt-hours per the feed's energy unit.
    #[clap(
        long = "unit-scale",
        env = "UNIT_SCALE",
        default_value_t = KILOWATT_HOURS_PER_MEGAWATT_HOUR,
        value_parser = parse_positive::<f64>,
    )]
    unit_scale: f64,

    /// Mean price per kilowatt-hour assumed for a window without any published prices.
    #[clap(
        long = "fallback-price-per-kwh",
        env = "FALLBACK_PRICE_PER_KWH",
        default_value = "0.50",
        value_parser = parse_positive::<KilowattHourPrice>,
    )]
    pub fallback_price: KilowattHourPrice,

    /// Local currency label, only used for display.
    #[clap(long, env = "CURRENCY", default_value = "PLN")]
    pub currency: String,
}

impl PriceArgs {
    pub fn conversion(&self) -> PriceConversion {
        PriceConversion::builder()
            .exchange_rate(self.exchange_rate)
            .unit_scale(self.unit_scale)
            .build()
    }
}
