use chrono::Local;
use clap::Parser;

use crate::{
    api::feed::PriceFeed,
    cli::{
        appliance::ApplianceArgs,
        feed::FeedArgs,
        fuel::FuelArgs,
        parse_non_negative,
        price::PriceArgs,
    },
    core::advice::{Advice, Advisor, Outcome},
    prelude::*,
    quantity::cost::Cost,
    tables::{build_price_table, build_summary_table, build_verdict_table},
};

#[derive(Clone, Parser)]
pub struct AdviseArgs {
    #[clap(flatten)]
    appliance: ApplianceArgs,

    #[clap(flatten)]
    fuel: FuelArgs,

    #[clap(flatten)]
    price: PriceArgs,

    #[clap(flatten)]
    pub(super) feed: FeedArgs,

    /// Minimal savings in the local currency worth waiting for.
    #[clap(
        long = "min-savings",
        env = "MIN_SAVINGS",
        default_value = "0.10",
        value_parser = parse_non_negative::<Cost>,
    )]
    min_savings: Cost,

    #[clap(long, env = "OUTPUT_FORMAT", default_value = "table")]
    format: Format,
}

#[derive(Copy, Clone, clap::ValueEnum)]
pub enum Format {
    /// Human-readable tables.
    Table,

    /// The advice as a JSON document.
    Json,
}

impl AdviseArgs {
    pub async fn run(self) -> Result {
        let feed = self.feed.connect()?;
        self.advise(&feed).await
    }

    /// Single pass: fetch, compute from scratch, and print.
    #[instrument(skip_all)]
    pub async fn advise(&self, feed: &impl PriceFeed) -> Result {
        let snapshot = feed.fetch().await.context("failed to fetch the prices")?;
        let advice = self.advisor().advise(&snapshot, &Local::now());
        self.print(&advice)
    }

    fn advisor(&self) -> Advisor {
        Advisor::builder()
            .conversion(self.price.conversion())
            .appliance(self.appliance.into())
            .fuel(self.fuel.into())
            .fallback_price(self.price.fallback_price)
            .min_savings(self.min_savings)
            .build()
    }

    fn print(&self, advice: &Advice) -> Result {
        let currency = &self.price.currency;
        match (self.format, &advice.outcome) {
            (Format::Json, _) => {
                println!("{}", serde_json::to_string_pretty(advice)?);
            }
            (Format::Table, Outcome::NoDataForToday) => {
                println!("Prices for {} are not published yet, try again later.", advice.date);
            }
            (Format::Table, Outcome::Recommended { recommendation, verdict }) => {
                println!("{}", build_price_table(advice, currency));
                println!("{}", build_summary_table(recommendation, currency));
                println!("{}", build_verdict_table(*verdict, recommendation, currency));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{api::feed::FeedSnapshot, cli::Args, cli::Command};

    struct OfflineFeed;

    #[async_trait]
    impl PriceFeed for OfflineFeed {
        async fn fetch(&self) -> Result<FeedSnapshot> {
            bail!("connection refused")
        }
    }

    struct EmptyFeed;

    #[async_trait]
    impl PriceFeed for EmptyFeed {
        async fn fetch(&self) -> Result<FeedSnapshot> {
            Ok(FeedSnapshot::default())
        }
    }

    fn parse(args: &[&str]) -> AdviseArgs {
        let Command::Advise(args) =
            Args::try_parse_from(["wattwait", "advise"].iter().chain(args)).unwrap().command
        else {
            unreachable!();
        };
        *args
    }

    #[tokio::test]
    async fn test_retrieval_failure() {
        let error = parse(&[]).advise(&OfflineFeed).await.unwrap_err();
        assert!(format!("{error:#}").contains("connection refused"));
    }

    #[tokio::test]
    async fn test_no_data_is_not_an_error() -> Result {
        parse(&["--format", "json"]).advise(&EmptyFeed).await
    }
}
