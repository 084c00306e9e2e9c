pub mod energy_charts;
pub mod feed;
