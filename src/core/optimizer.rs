use std::ops::RangeInclusive;

use bon::Builder;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::table::{DailyPriceTable, HOURS_PER_DAY},
    prelude::*,
    quantity::{
        cost::Cost,
        energy::KilowattHours,
        fuel::{Kilometers, LiterPrice, Liters, LitersPer100Km},
        power::Kilowatts,
        price::KilowattHourPrice,
        time::Hours,
    },
};

/// Mean price assumed for a window without any data at all.
pub const FALLBACK_PRICE: KilowattHourPrice = KilowattHourPrice(0.50);

#[derive(Copy, Clone, Debug, Serialize)]
pub struct Appliance {
    pub power: Kilowatts,

    /// Whole hours the appliance runs for, at least one.
    pub duration_hours: u32,
}

impl Appliance {
    pub fn energy(self) -> KilowattHours {
        self.power * Hours::from(self.duration_hours)
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
pub struct Fuel {
    pub price: LiterPrice,
    pub consumption: LitersPer100Km,
}

/// Price of running the appliance in the window starting at `start_hour`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WindowQuote {
    pub start_hour: u32,

    /// Exclusive, may point past midnight.
    pub end_hour: u32,

    pub mean_price: KilowattHourPrice,
    pub cost: Cost,

    /// Every hour of the window has a price.
    pub is_complete: bool,

    /// No hour of the window has a price, [`WindowQuote::mean_price`] is the fallback.
    pub is_fallback: bool,
}

#[derive(Copy, Clone, Debug, Serialize)]
pub struct Recommendation {
    pub cost_now: Cost,
    pub best_hour: u32,
    pub cost_best: Cost,
    pub savings: Cost,

    /// Fuel one could buy for the savings, zero when waiting brings nothing.
    pub fuel_liters: Liters,

    /// Distance one could drive on [`Recommendation::fuel_liters`].
    pub distance_km: Kilometers,

    /// Waiting for the best window is strictly cheaper than running now.
    pub is_beneficial: bool,

    pub now: WindowQuote,
    pub best: WindowQuote,
}

impl Recommendation {
    /// Either of the quotes is not backed by a full set of prices.
    pub const fn is_estimate(&self) -> bool {
        !self.now.is_complete || !self.best.is_complete
    }
}

#[derive(Builder)]
pub struct Optimizer<'a> {
    table: &'a DailyPriceTable,

    /// Hour of the day, `0..24`.
    current_hour: u32,

    appliance: Appliance,
    fuel: Fuel,

    #[builder(default = FALLBACK_PRICE)]
    fallback_price: KilowattHourPrice,
}

impl Optimizer<'_> {
    /// Find the cheapest window which starts no earlier than the current hour and ends by midnight.
    ///
    /// The window starting right now is the first candidate, and a later one only replaces the best
    /// on a strict improvement, hence the earliest of the equally cheap windows wins. When the
    /// appliance does not fit before midnight anymore, running now is the only option.
    #[instrument(
        skip_all,
        fields(current_hour = self.current_hour, duration_hours = self.appliance.duration_hours)
    )]
    pub fn optimize(self) -> Recommendation {
        let now = self.quote(self.current_hour);
        Self::check(&now, "now");

        let best = self
            .candidate_hours()
            .map(|start_hour| self.quote(start_hour))
            .inspect(|quote| debug!(quote.start_hour, ?quote.mean_price, ?quote.cost, "candidate"))
            .min_by_key(|quote| quote.cost)
            .unwrap_or(now);
        if best.start_hour != now.start_hour {
            Self::check(&best, "best");
        }

        let savings = now.cost - best.cost;
        let is_beneficial = savings > Cost::ZERO;
        let (fuel_liters, distance_km) = if is_beneficial {
            let fuel_liters = savings / self.fuel.price;
            (fuel_liters, fuel_liters / self.fuel.consumption)
        } else {
            (Liters::ZERO, Kilometers::ZERO)
        };
        info!(best.start_hour, ?now.cost, ?best.cost, ?savings, "optimized");

        Recommendation {
            cost_now: now.cost,
            best_hour: best.start_hour,
            cost_best: best.cost,
            savings,
            fuel_liters,
            distance_km,
            is_beneficial,
            now,
            best,
        }
    }

    /// Window start hours which still end by midnight, empty if none does.
    fn candidate_hours(&self) -> RangeInclusive<u32> {
        self.current_hour..=HOURS_PER_DAY.saturating_sub(self.appliance.duration_hours)
    }

    /// Quote the window using the mean of the prices which are present.
    ///
    /// Hours past midnight never wrap to the next day: they are simply missing.
    fn quote(&self, start_hour: u32) -> WindowQuote {
        let end_hour = start_hour + self.appliance.duration_hours;
        let prices = (start_hour..end_hour)
            .filter_map(|hour| self.table.get(hour))
            .collect_vec();
        let is_complete = prices.len() == self.appliance.duration_hours as usize;
        let (mean_price, is_fallback) = KilowattHourPrice::mean(prices)
            .map_or((self.fallback_price, true), |mean_price| (mean_price, false));
        WindowQuote {
            start_hour,
            end_hour,
            mean_price,
            cost: self.appliance.energy() * mean_price,
            is_complete,
            is_fallback,
        }
    }

    fn check(quote: &WindowQuote, label: &'static str) {
        if quote.is_fallback {
            warn!(label, quote.start_hour, ?quote.mean_price, "no prices in the window, using the fallback");
        } else if !quote.is_complete {
            warn!(label, quote.start_hour, "some hours in the window have no price");
        }
    }
}
