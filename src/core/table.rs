use bon::Builder;
use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use serde::{Serialize, Serializer};

use crate::{
    core::point::{PricePoint, RawPoint},
    prelude::*,
    quantity::price::{EuroPerMegawattHour, ExchangeRate, KilowattHourPrice},
};

pub const HOURS_PER_DAY: u32 = 24;

/// Fixed ratio between the feed's energy unit (MWh) and the local one (kWh).
pub const KILOWATT_HOURS_PER_MEGAWATT_HOUR: f64 = 1000.0;

/// Conversion from the wholesale price unit into the local price unit.
#[derive(Copy, Clone, Debug, Builder)]
pub struct PriceConversion {
    exchange_rate: ExchangeRate,

    #[builder(default = KILOWATT_HOURS_PER_MEGAWATT_HOUR)]
    unit_scale: f64,
}

impl PriceConversion {
    pub fn convert(self, price: EuroPerMegawattHour) -> KilowattHourPrice {
        KilowattHourPrice(price.0 * self.exchange_rate.0 / self.unit_scale)
    }
}

/// Prices indexed by hour of a single calendar day.
///
/// Hours without data are absent: a table may be incomplete or even empty when the exchange has
/// not published the day yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyPriceTable([Option<KilowattHourPrice>; HOURS_PER_DAY as usize]);

impl DailyPriceTable {
    /// Build the table for `date` from the raw feed points.
    ///
    /// Points are placed by their wall-clock hour in `timezone`, points from the other dates are
    /// dropped. When several points fall into the same hour, the last one wins.
    #[instrument(skip_all, fields(date = %date))]
    pub fn build<Tz: TimeZone>(
        points: impl IntoIterator<Item = RawPoint>,
        conversion: PriceConversion,
        date: NaiveDate,
        timezone: &Tz,
    ) -> Self {
        let mut table = Self::default();
        for point in points {
            let Some(time) = DateTime::from_timestamp(point.timestamp, 0) else {
                warn!(point.timestamp, "skipped an out-of-range timestamp");
                continue;
            };
            if !point.price.0.is_finite() {
                warn!(point.timestamp, "skipped a non-finite price");
                continue;
            }
            let time = time.with_timezone(timezone);
            if time.date_naive() != date {
                continue;
            }
            let slot = &mut table.0[time.hour() as usize];
            if slot.is_some() {
                debug!(hour = time.hour(), "overwriting the hour with a later point");
            }
            *slot = Some(conversion.convert(point.price));
        }
        debug!(len = table.len(), "built");
        table
    }

    pub fn get(&self, hour: u32) -> Option<KilowattHourPrice> {
        self.0.get(hour as usize).copied().flatten()
    }

    pub fn points(&self) -> impl Iterator<Item = PricePoint> + '_ {
        (0..HOURS_PER_DAY).filter_map(|hour| self.get(hour).map(|price| PricePoint::new(hour, price)))
    }

    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn mean(&self) -> Option<KilowattHourPrice> {
        KilowattHourPrice::mean(self.0.iter().flatten().copied())
    }

    pub fn max(&self) -> Option<KilowattHourPrice> {
        self.0.iter().flatten().copied().max()
    }
}

impl Serialize for DailyPriceTable {
    /// Serialize as the sequence of the present points.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points())
    }
}

impl FromIterator<PricePoint> for DailyPriceTable {
    /// Last point wins, hours outside of the day are ignored.
    fn from_iter<T: IntoIterator<Item = PricePoint>>(points: T) -> Self {
        let mut table = Self::default();
        for point in points {
            if let Some(slot) = table.0.get_mut(point.hour as usize) {
                *slot = Some(point.price);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn conversion() -> PriceConversion {
        PriceConversion::builder().exchange_rate(ExchangeRate(4.30)).build()
    }

    fn timestamp(day: u32, hour: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap().timestamp()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 18).unwrap()
    }

    #[test]
    fn test_convert() {
        let price = conversion().convert(EuroPerMegawattHour(100.0));
        assert_abs_diff_eq!(price.0, 0.43, epsilon = 1e-9);
    }

    #[test]
    fn test_convert_custom_scale() {
        let conversion =
            PriceConversion::builder().exchange_rate(ExchangeRate(1.0)).unit_scale(1.0).build();
        assert_abs_diff_eq!(conversion.convert(EuroPerMegawattHour(0.25)).0, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_build_keeps_reference_date_only() {
        let points = [
            RawPoint::new(timestamp(17, 23), EuroPerMegawattHour(1.0)),
            RawPoint::new(timestamp(18, 0), EuroPerMegawattHour(100.0)),
            RawPoint::new(timestamp(18, 13), EuroPerMegawattHour(200.0)),
            RawPoint::new(timestamp(19, 0), EuroPerMegawattHour(1.0)),
        ];
        let table = DailyPriceTable::build(points, conversion(), date(), &Utc);
        assert_eq!(table.len(), 2);
        assert_abs_diff_eq!(table.get(0).unwrap().0, 0.43, epsilon = 1e-9);
        assert_abs_diff_eq!(table.get(13).unwrap().0, 0.86, epsilon = 1e-9);
        assert_eq!(table.get(23), None);
    }

    #[test]
    fn test_build_uses_wall_clock_time() {
        // 22:00 UTC on the 17th is already midnight of the 18th two hours east:
        let timezone = FixedOffset::east_opt(2 * 3600).unwrap();
        let points = [RawPoint::new(timestamp(17, 22), EuroPerMegawattHour(100.0))];
        let table = DailyPriceTable::build(points, conversion(), date(), &timezone);
        assert!(table.get(0).is_some());
    }

    #[test]
    fn test_build_last_wins() {
        let points = [
            RawPoint::new(timestamp(18, 5), EuroPerMegawattHour(100.0)),
            RawPoint::new(timestamp(18, 5) + 900, EuroPerMegawattHour(200.0)),
        ];
        let table = DailyPriceTable::build(points, conversion(), date(), &Utc);
        assert_eq!(table.len(), 1);
        assert_abs_diff_eq!(table.get(5).unwrap().0, 0.86, epsilon = 1e-9);
    }

    #[test]
    fn test_build_quarter_hours_take_the_last_quarter() {
        let points = [100.0, 120.0, 140.0, 160.0]
            .into_iter()
            .zip(0..)
            .map(|(price, quarter)| {
                RawPoint::new(timestamp(18, 7) + quarter * 900, EuroPerMegawattHour(price))
            });
        let table = DailyPriceTable::build(points, conversion(), date(), &Utc);
        assert_eq!(table.len(), 1);
        assert_abs_diff_eq!(table.get(7).unwrap().0, 0.688, epsilon = 1e-9);
    }

    #[test]
    fn test_build_empty() {
        let points = [RawPoint::new(timestamp(17, 12), EuroPerMegawattHour(100.0))];
        let table = DailyPriceTable::build(points, conversion(), date(), &Utc);
        assert!(table.is_empty());
        assert_eq!(table.mean(), None);
    }

    #[test]
    fn test_build_skips_invalid_points() {
        let points = [
            RawPoint::new(i64::MAX, EuroPerMegawattHour(100.0)),
            RawPoint::new(timestamp(18, 1), EuroPerMegawattHour(f64::NAN)),
        ];
        let table = DailyPriceTable::build(points, conversion(), date(), &Utc);
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_iter_ignores_hours_past_midnight() {
        let table: DailyPriceTable = [
            PricePoint::new(23, KilowattHourPrice(0.1)),
            PricePoint::new(24, KilowattHourPrice(0.2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.points().collect::<Vec<_>>(), [PricePoint::new(23, KilowattHourPrice(0.1))]);
    }
}
