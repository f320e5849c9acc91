use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use ordered_float::OrderedFloat;

use crate::quantity::{Quantity, energy::KilowattHours, rate::KilowattHourRate};

pub type Cost = Quantity<0, 0, 1>;

impl Cost {
    pub const ONE_CENT: Self = Self(OrderedFloat(0.01));
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€", self.0)
    }
}

/// Consumption at which a cost difference is made up by a rate difference.
impl Div<KilowattHourRate> for Cost {
    type Output = KilowattHours;

    fn div(self, rhs: KilowattHourRate) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}
