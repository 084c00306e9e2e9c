use std::ops::Div;

quantity!(Liters, suffix: "L", precision: 2);
quantity!(Kilometers, suffix: "km", precision: 1);

quantity!(
    /// Fuel price in local currency per liter.
    LiterPrice,
    suffix: "/L",
    precision: 2
);

quantity!(
    /// Vehicle fuel consumption.
    LitersPer100Km,
    suffix: "L/100km",
    precision: 1
);

impl Div<LitersPer100Km> for Liters {
    type Output = Kilometers;

    fn div(self, consumption: LitersPer100Km) -> Self::Output {
        Kilometers(self.0 / consumption.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::cost::Cost;

    #[test]
    fn test_distance() {
        let liters = Cost(0.80) / LiterPrice(6.40);
        assert_abs_diff_eq!(liters.0, 0.125);
        assert_abs_diff_eq!((liters / LitersPer100Km(5.0)).0, 2.5);
    }
}
