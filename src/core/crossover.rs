use itertools::Itertools;

use crate::{
    core::tariff::{Tariff, TariffId},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Unit prices closer than this are treated as equal, the lines are then parallel.
pub const UNIT_PRICE_EPSILON: f64 = 1e-5;

/// Consumption at which two tariffs cost the same.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Crossover {
    /// Break-even consumption, rounded to whole kilowatt-hours.
    pub consumption: KilowattHours,

    /// The pair, in input order.
    pub tariffs: (TariffId, TariffId),

    /// Annual cost of the first tariff at the exact (unrounded) break-even consumption.
    pub cost: Cost,
}

/// Solve `lhs(x) = rhs(x)` on the affine cost formulas, ignoring the zero floor.
///
/// Returns [`None`] for (nearly) equal unit prices: the cost difference is then constant,
/// even when it is zero everywhere.
#[must_use]
pub fn crossover_point(lhs: &Tariff, rhs: &Tariff) -> Option<KilowattHours> {
    let unit_price_difference: KilowattHourRate = lhs.unit_price - rhs.unit_price;
    if unit_price_difference.abs().0.0 <= UNIT_PRICE_EPSILON {
        return None;
    }
    let fixed_difference = (rhs.base_price - lhs.base_price).annual() + lhs.bonus - rhs.bonus;
    Some(fixed_difference / unit_price_difference)
}

/// Find break-even points of every tariff pair within `(0, max_consumption]`, ascending.
///
/// The zero floor on annual cost is not taken into account: a tariff whose bonus fully offsets
/// its cost near the crossover still reports the algebraic intersection.
#[instrument(skip_all, fields(n_tariffs = tariffs.len()))]
pub fn find_crossovers(tariffs: &[Tariff], max_consumption: KilowattHours) -> Vec<Crossover> {
    let crossovers = tariffs
        .iter()
        .tuple_combinations()
        .filter_map(|(lhs, rhs)| {
            let consumption = crossover_point(lhs, rhs)?;
            if consumption <= KilowattHours::ZERO || consumption > max_consumption {
                trace!(lhs = %lhs.id, rhs = %rhs.id, ?consumption, "out of range");
                return None;
            }
            Some(Crossover {
                consumption: consumption.round(),
                tariffs: (lhs.id.clone(), rhs.id.clone()),
                cost: lhs.annual_cost(consumption),
            })
        })
        .sorted_by_key(|crossover| crossover.consumption)
        .collect_vec();
    debug!(n_crossovers = crossovers.len(), "found crossovers");
    crossovers
}
