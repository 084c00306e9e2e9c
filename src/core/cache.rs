use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use bon::Builder;
use chrono::{DateTime, Local, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tokio::sync::Mutex;

use crate::{
    api::feed::{FeedSnapshot, PriceFeed},
    prelude::*,
};

/// Time-boxed memoizer around a price feed.
///
/// Keeps the last snapshot in memory and, optionally, in a file so that consecutive runs share it.
#[derive(Builder)]
pub struct Cached<F> {
    inner: F,

    /// How long a fetched snapshot stays valid.
    ttl: TimeDelta,

    path: Option<PathBuf>,

    #[builder(skip)]
    entry: Mutex<Option<Entry>>,
}

#[async_trait]
impl<F: PriceFeed> PriceFeed for Cached<F> {
    #[instrument(skip_all)]
    async fn fetch(&self) -> Result<FeedSnapshot> {
        let now = Local::now();
        let mut entry = self.entry.lock().await;

        if entry.is_none()
            && let Some(path) = &self.path
        {
            *entry = Entry::read_from(path);
        }
        if let Some(cached) = entry.as_ref()
            && cached.is_fresh(now, self.ttl)
        {
            debug!(fetched_at = %cached.fetched_at, "using the cached snapshot");
            return Ok(cached.snapshot.clone());
        }

        let snapshot = self.inner.fetch().await?;
        let fresh = Entry::new(now, snapshot.clone());
        if let Some(path) = &self.path {
            fresh.write_to(path);
        }
        *entry = Some(fresh);
        Ok(snapshot)
    }
}

#[serde_as]
#[derive(Clone, Deserialize, Serialize)]
struct Entry {
    #[serde_as(as = "serde_with::TimestampSeconds<i64>")]
    fetched_at: DateTime<Local>,

    snapshot: FeedSnapshot,
}

impl Entry {
    /// The file only keeps whole seconds, so drop the fraction right away.
    fn new(fetched_at: DateTime<Local>, snapshot: FeedSnapshot) -> Self {
        Self { fetched_at: fetched_at.with_nanosecond(0).unwrap_or(fetched_at), snapshot }
    }

    fn is_fresh(&self, now: DateTime<Local>, ttl: TimeDelta) -> bool {
        let age = now - self.fetched_at;
        (age >= TimeDelta::zero()) && (age < ttl)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn read_from(path: &Path) -> Option<Self> {
        Self::read_fallibly_from(path).unwrap_or_else(|error| {
            warn!("failed to read the cache, ignoring: {error:#}");
            None
        })
    }

    fn read_fallibly_from(path: &Path) -> Result<Option<Self>> {
        if path.is_file() { Ok(Some(toml::from_str(&fs::read_to_string(path)?)?)) } else { Ok(None) }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn write_to(&self, path: &Path) {
        if let Err(error) = self.write_fallibly_to(path) {
            warn!("failed to write the cache: {error:#}");
        }
    }

    fn write_fallibly_to(&self, path: &Path) -> Result {
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }
}
