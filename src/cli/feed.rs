use std::path::PathBuf;

use chrono::TimeDelta;
use clap::Parser;
use reqwest::Url;

use crate::{api::energy_charts, core::cache::Cached, prelude::*};

#[derive(Clone, Parser)]
pub struct FeedArgs {
    /// Bidding zone code as known to Energy-Charts, for example: `PL`, `DE-LU`, or `NL`.
    #[clap(long = "bidding-zone", env = "BIDDING_ZONE", default_value = "PL")]
    bidding_zone: String,

    #[clap(
        long = "energy-charts-base-url",
        env = "ENERGY_CHARTS_BASE_URL",
        default_value = "https://api.energy-charts.info"
    )]
    base_url: Url,

    /// How long fetched prices stay valid.
    #[clap(long = "cache-ttl", env = "CACHE_TTL", default_value = "15min")]
    cache_ttl: humantime::Duration,

    /// Keep fetched prices in this file between the runs.
    #[clap(long = "cache-path", env = "CACHE_PATH")]
    cache_path: Option<PathBuf>,
}

impl FeedArgs {
    pub fn connect(&self) -> Result<Cached<energy_charts::Api>> {
        let api = energy_charts::Api::new(self.base_url.clone(), self.bidding_zone.clone())?;
        let ttl = TimeDelta::from_std(self.cache_ttl.into()).context("cache TTL is too long")?;
        Ok(Cached::builder().inner(api).ttl(ttl).maybe_path(self.cache_path.clone()).build())
    }
}
