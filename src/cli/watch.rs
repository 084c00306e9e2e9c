use std::time::Duration;

use clap::Parser;
use tokio::time::{MissedTickBehavior, interval};

use crate::{cli::advise::AdviseArgs, prelude::*};

#[derive(Parser)]
pub struct WatchArgs {
    /// How often to recompute the advice. Prices are only refetched once the cache expires.
    #[clap(long = "refresh-interval", env = "REFRESH_INTERVAL", default_value = "1min")]
    refresh_interval: humantime::Duration,

    #[clap(flatten)]
    advise: AdviseArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let period: Duration = self.refresh_interval.into();
        ensure!(!period.is_zero(), "refresh interval must be positive");

        let feed = self.advise.feed.connect()?;
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(error) = self.advise.advise(&feed).await {
                error!("failed to advise, retrying on the next refresh: {error:#}");
            }
        }
    }
}
