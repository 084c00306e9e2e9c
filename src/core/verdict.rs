use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::Serialize;

use crate::{core::optimizer::Recommendation, quantity::cost::Cost};

/// Default minimal savings worth waiting for, in the local currency.
pub const MIN_SAVINGS: Cost = Cost(0.10);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Verdict {
    /// Postpone the start until the cheapest window.
    Wait { until_hour: u32 },

    /// Prices are flat enough, start right away.
    RunNow,
}

impl Verdict {
    /// Waiting only pays off for a window with published prices, never for a fallback guess.
    pub fn from_recommendation(recommendation: &Recommendation, min_savings: Cost) -> Self {
        if recommendation.is_beneficial
            && !recommendation.best.is_fallback
            && recommendation.savings > min_savings
        {
            Self::Wait { until_hour: recommendation.best_hour }
        } else {
            Self::RunNow
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Wait { .. } => Color::Green,
            Self::RunNow => Color::DarkYellow,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wait { until_hour } => write!(f, "Wait until {until_hour:02}:00"),
            Self::RunNow => write!(f, "Run now, prices are flat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            optimizer::{Appliance, Fuel, Optimizer},
            point::PricePoint,
            table::DailyPriceTable,
        },
        quantity::{
            fuel::{LiterPrice, LitersPer100Km},
            power::Kilowatts,
            price::KilowattHourPrice,
        },
    };

    fn recommend(later_price: f64) -> Recommendation {
        let table: DailyPriceTable = (0..24)
            .map(|hour| {
                PricePoint::new(hour, KilowattHourPrice(if hour < 12 { 0.50 } else { later_price }))
            })
            .collect();
        Optimizer::builder()
            .table(&table)
            .current_hour(8)
            .appliance(Appliance { power: Kilowatts(1.0), duration_hours: 1 })
            .fuel(Fuel { price: LiterPrice(6.0), consumption: LitersPer100Km(6.0) })
            .build()
            .optimize()
    }

    #[test]
    fn test_wait() {
        let verdict = Verdict::from_recommendation(&recommend(0.20), MIN_SAVINGS);
        assert_eq!(verdict, Verdict::Wait { until_hour: 12 });
        assert_eq!(verdict.to_string(), "Wait until 12:00");
    }

    #[test]
    fn test_savings_below_threshold() {
        let verdict = Verdict::from_recommendation(&recommend(0.45), MIN_SAVINGS);
        assert_eq!(verdict, Verdict::RunNow);
    }

    #[test]
    fn test_zero_threshold() {
        let verdict = Verdict::from_recommendation(&recommend(0.45), Cost::ZERO);
        assert_eq!(verdict, Verdict::Wait { until_hour: 12 });
    }

    #[test]
    fn test_no_benefit() {
        let verdict = Verdict::from_recommendation(&recommend(0.50), Cost::ZERO);
        assert_eq!(verdict, Verdict::RunNow);
    }

    #[test]
    fn test_unpublished_window_is_not_worth_waiting() {
        let table: DailyPriceTable =
            (0..20).map(|hour| PricePoint::new(hour, KilowattHourPrice(0.80))).collect();
        let recommendation = Optimizer::builder()
            .table(&table)
            .current_hour(10)
            .appliance(Appliance { power: Kilowatts(2.0), duration_hours: 1 })
            .fuel(Fuel { price: LiterPrice(6.0), consumption: LitersPer100Km(6.0) })
            .build()
            .optimize();
        assert_eq!(recommendation.best_hour, 20);
        assert!(recommendation.best.is_fallback);
        assert_eq!(Verdict::from_recommendation(&recommendation, MIN_SAVINGS), Verdict::RunNow);
    }

    #[test]
    fn test_serialize() -> crate::prelude::Result {
        let json = serde_json::to_value(Verdict::Wait { until_hour: 3 })?;
        assert_eq!(json, serde_json::json!({ "action": "wait", "until_hour": 3 }));
        Ok(())
    }
}
