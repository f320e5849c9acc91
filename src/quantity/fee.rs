use std::fmt::{Debug, Display, Formatter};

use crate::quantity::{Quantity, cost::Cost};

/// Euro per month.
pub type MonthlyFee = Quantity<0, -1, 1>;

impl MonthlyFee {
    pub const MONTHS_PER_YEAR: f64 = 12.0;

    pub fn annual(self) -> Cost {
        Quantity(self.0 * Self::MONTHS_PER_YEAR)
    }
}

impl Display for MonthlyFee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/month", self.0)
    }
}

impl Debug for MonthlyFee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€/mo", self.0)
    }
}
