use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{core::point::RawPoint, prelude::*};

/// Raw prices as fetched from a feed, in no particular order and possibly spanning several days.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FeedSnapshot {
    pub points: Vec<RawPoint>,
}

#[async_trait]
pub trait PriceFeed: Sync {
    async fn fetch(&self) -> Result<FeedSnapshot>;
}
