use std::fmt::{Debug, Display, Formatter};

quantity!(
    /// Wholesale price in euro per megawatt-hour, as published by the exchanges.
    EuroPerMegawattHour,
    suffix: "€/MWh",
    precision: 2
);

quantity!(
    /// Price in local currency per kilowatt-hour.
    KilowattHourPrice
);

quantity!(
    /// Units of local currency per one euro.
    ExchangeRate,
    suffix: "/€",
    precision: 4
);

impl KilowattHourPrice {
    /// Mean of the prices, `None` if there are none.
    pub fn mean(prices: impl IntoIterator<Item = Self>) -> Option<Self> {
        let (sum, count) =
            prices.into_iter().fold((Self::ZERO, 0_u32), |(sum, count), price| (sum + price, count + 1));
        (count != 0).then(|| sum / f64::from(count))
    }
}

impl Display for KilowattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}/kWh", self.0)
    }
}

impl Debug for KilowattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}/kWh", self.0)
    }
}
