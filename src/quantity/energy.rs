use std::ops::Mul;

use crate::quantity::{cost::Cost, price::KilowattHourPrice};

quantity!(KilowattHours, suffix: "kWh", precision: 2);

impl Mul<KilowattHourPrice> for KilowattHours {
    type Output = Cost;

    fn mul(self, price: KilowattHourPrice) -> Self::Output {
        Cost(self.0 * price.0)
    }
}
