use bon::Builder;
use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

use crate::{
    api::feed::FeedSnapshot,
    core::{
        optimizer::{Appliance, FALLBACK_PRICE, Fuel, Optimizer, Recommendation},
        table::{DailyPriceTable, PriceConversion},
        verdict::{MIN_SAVINGS, Verdict},
    },
    prelude::*,
    quantity::{cost::Cost, price::KilowattHourPrice},
};

/// Everything the presentation layer needs after a single pass.
#[derive(Serialize)]
pub struct Advice {
    pub date: NaiveDate,
    pub current_hour: u32,
    pub table: DailyPriceTable,
    pub outcome: Outcome,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// The feed is reachable, but today's prices are not published yet.
    NoDataForToday,

    Recommended { recommendation: Recommendation, verdict: Verdict },
}

/// Turns a feed snapshot into an advice, holding the whole configuration of the pass.
#[derive(Builder)]
pub struct Advisor {
    conversion: PriceConversion,
    appliance: Appliance,
    fuel: Fuel,

    #[builder(default = FALLBACK_PRICE)]
    fallback_price: KilowattHourPrice,

    #[builder(default = MIN_SAVINGS)]
    min_savings: Cost,
}

impl Advisor {
    #[instrument(skip_all, fields(now = %now))]
    pub fn advise<Tz: TimeZone>(&self, snapshot: &FeedSnapshot, now: &DateTime<Tz>) -> Advice
    where
        Tz::Offset: std::fmt::Display,
    {
        let date = now.date_naive();
        let current_hour = now.hour();
        let table = DailyPriceTable::build(
            snapshot.points.iter().copied(),
            self.conversion,
            date,
            &now.timezone(),
        );

        let outcome = if table.is_empty() {
            warn!(%date, "no prices for today yet");
            Outcome::NoDataForToday
        } else {
            let recommendation = Optimizer::builder()
                .table(&table)
                .current_hour(current_hour)
                .appliance(self.appliance)
                .fuel(self.fuel)
                .fallback_price(self.fallback_price)
                .build()
                .optimize();
            let verdict = Verdict::from_recommendation(&recommendation, self.min_savings);
            Outcome::Recommended { recommendation, verdict }
        };

        Advice { date, current_hour, table, outcome }
    }
}
