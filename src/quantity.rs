pub mod cost;
pub mod energy;
pub mod fee;
pub mod rate;

use std::ops::{Div, Mul};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Dimension-typed scalar: `ENERGY` is in kilowatt-hours, `TIME` in months, `COST` in euros.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[from(f64, OrderedFloat<f64>)]
#[must_use]
pub struct Quantity<const ENERGY: isize, const TIME: isize, const COST: isize>(
    pub OrderedFloat<f64>,
);

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Quantity<ENERGY, TIME, COST> {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    pub const fn abs(mut self) -> Self {
        self.0 = OrderedFloat(self.0.0.abs());
        self
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.0.0.is_finite()
    }

    /// Finite and not below zero.
    #[must_use]
    pub fn is_non_negative(self) -> bool {
        self.is_finite() && self >= Self::ZERO
    }

    pub fn round(self) -> Self {
        Self(OrderedFloat(self.0.0.round()))
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Mul<f64>
    for Quantity<ENERGY, TIME, COST>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Div<f64>
    for Quantity<ENERGY, TIME, COST>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Div<Self>
    for Quantity<ENERGY, TIME, COST>
{
    type Output = OrderedFloat<f64>;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
