use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use crate::quantity::fuel::{LiterPrice, Liters};

quantity!(
    /// Amount of money in the local currency.
    Cost
);

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Div<LiterPrice> for Cost {
    type Output = Liters;

    fn div(self, price: LiterPrice) -> Self::Output {
        Liters(self.0 / price.0)
    }
}
