use serde::{Deserialize, Serialize};

use crate::quantity::price::{EuroPerMegawattHour, KilowattHourPrice};

/// Price feed point as published by the exchange.
#[derive(Copy, Clone, Debug, PartialEq, derive_more::Constructor, Deserialize, Serialize)]
pub struct RawPoint {
    /// UNIX timestamp of the delivery period start.
    pub timestamp: i64,

    pub price: EuroPerMegawattHour,
}

/// Hour of the day along with its price in the local currency.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Constructor, Serialize)]
pub struct PricePoint {
    pub hour: u32,
    pub price: KilowattHourPrice,
}
