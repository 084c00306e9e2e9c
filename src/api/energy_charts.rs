//! [Energy-Charts](https://api.energy-charts.info) day-ahead price client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    api::feed::{FeedSnapshot, PriceFeed},
    core::point::RawPoint,
    prelude::*,
    quantity::price::EuroPerMegawattHour,
};

const EXPECTED_UNIT: &str = "EUR / MWh";

pub struct Api {
    client: Client,
    base_url: Url,
    bidding_zone: String,
}

impl Api {
    pub fn new(base_url: Url, bidding_zone: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, base_url, bidding_zone })
    }

    fn price_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL: `{}`", self.base_url))?
            .pop_if_empty()
            .push("price");
        url.query_pairs_mut().append_pair("bzn", &self.bidding_zone);
        Ok(url)
    }
}

#[async_trait]
impl PriceFeed for Api {
    #[instrument(skip_all, fields(bidding_zone = %self.bidding_zone))]
    async fn fetch(&self) -> Result<FeedSnapshot> {
        let url = self.price_url()?;
        info!(%url, "fetching…");
        let snapshot: FeedSnapshot = self
            .client
            .get(url)
            .send()
            .await
            .context("failed to call Energy-Charts")?
            .error_for_status()
            .context("Energy-Charts request failed")?
            .json::<PriceResponse>()
            .await
            .context("failed to deserialize the response")?
            .try_into()?;
        info!(n_points = snapshot.points.len(), "fetched");
        Ok(snapshot)
    }
}

/// Parallel sequences of the timestamps and prices.
#[derive(Deserialize)]
struct PriceResponse {
    unix_seconds: Vec<i64>,

    /// Gaps are published as `null`.
    price: Vec<Option<f64>>,

    unit: Option<String>,
}

impl TryFrom<PriceResponse> for FeedSnapshot {
    type Error = Error;

    fn try_from(response: PriceResponse) -> Result<Self> {
        ensure!(
            response.unix_seconds.len() == response.price.len(),
            "malformed response: {} timestamps but {} prices",
            response.unix_seconds.len(),
            response.price.len(),
        );
        if let Some(unit) = &response.unit
            && unit != EXPECTED_UNIT
        {
            warn!(unit, "unexpected price unit, treating it as `{EXPECTED_UNIT}`");
        }
        let points = response
            .unix_seconds
            .into_iter()
            .zip(response.price)
            .filter_map(|(timestamp, price)| {
                if price.is_none() {
                    warn!(timestamp, "skipped a point without price");
                }
                Some(RawPoint::new(timestamp, EuroPerMegawattHour(price?)))
            })
            .collect();
        Ok(Self { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ok() -> Result {
        // language=json
        const RESPONSE: &str = r#"{
            "license_info": "CC BY 4.0 (creativecommons.org/licenses/by/4.0) from Bundesnetzagentur | SMARD.de",
            "unix_seconds": [1760738400, 1760742000, 1760745600],
            "price": [101.5, null, 87.25],
            "unit": "EUR / MWh",
            "deprecated": false
        }"#;
        let snapshot = FeedSnapshot::try_from(serde_json::from_str::<PriceResponse>(RESPONSE)?)?;
        assert_eq!(
            snapshot.points,
            [
                RawPoint::new(1_760_738_400, EuroPerMegawattHour(101.5)),
                RawPoint::new(1_760_745_600, EuroPerMegawattHour(87.25)),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_length_mismatch() -> Result {
        // language=json
        const RESPONSE: &str = r#"{"unix_seconds": [1760738400, 1760742000], "price": [101.5]}"#;
        let response = serde_json::from_str::<PriceResponse>(RESPONSE)?;
        assert!(FeedSnapshot::try_from(response).is_err());
        Ok(())
    }

    #[test]
    fn test_price_url() -> Result {
        let api = Api::new(Url::parse("https://api.energy-charts.info")?, "PL".to_string())?;
        assert_eq!(api.price_url()?.as_str(), "https://api.energy-charts.info/price?bzn=PL");
        Ok(())
    }

    #[test]
    fn test_price_url_with_path() -> Result {
        let api = Api::new(Url::parse("http://localhost:8080/mirror/")?, "DE-LU".to_string())?;
        assert_eq!(api.price_url()?.as_str(), "http://localhost:8080/mirror/price?bzn=DE-LU");
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_fetch_ok() -> Result {
        let api = Api::new(Url::parse("https://api.energy-charts.info")?, "PL".to_string())?;
        let snapshot = api.fetch().await?;
        assert!(!snapshot.points.is_empty());
        assert!(snapshot.points.is_sorted_by_key(|point| point.timestamp));
        Ok(())
    }
}
