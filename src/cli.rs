mod advise;
mod appliance;
mod feed;
mod fuel;
mod price;
mod watch;

use std::str::FromStr;

use clap::{Parser, Subcommand};

pub use self::{advise::AdviseArgs, watch::WatchArgs};
use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch today's prices and tell whether it is worth waiting.
    #[clap(name = "advise")]
    Advise(Box<AdviseArgs>),

    /// Keep advising, refreshing periodically.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),
}

/// Parse a strictly positive finite number, rejecting anything else before it reaches the core.
fn parse_positive<T>(value: &str) -> Result<T>
where
    T: FromStr + Into<f64> + Copy,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parsed = parse_finite::<T>(value)?;
    let number: f64 = parsed.into();
    ensure!(number > 0.0, "`{value}` must be a positive number");
    Ok(parsed)
}

/// Same as [`parse_positive`], but also accepts zero.
fn parse_non_negative<T>(value: &str) -> Result<T>
where
    T: FromStr + Into<f64> + Copy,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parsed = parse_finite::<T>(value)?;
    let number: f64 = parsed.into();
    ensure!(number >= 0.0, "`{value}` must not be negative");
    Ok(parsed)
}

fn parse_finite<T>(value: &str) -> Result<T>
where
    T: FromStr + Into<f64> + Copy,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parsed = T::from_str(value).with_context(|| format!("`{value}` is not a number"))?;
    let number: f64 = parsed.into();
    ensure!(number.is_finite(), "`{value}` must be a finite number");
    Ok(parsed)
}
