use itertools::Itertools;

use crate::{
    core::tariff::{Tariff, TariffId},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct RankedTariff {
    pub tariff_id: TariffId,
    pub cost: Cost,

    /// Position in the ranking, starting from 1. Tied tariffs still get distinct ranks.
    pub rank: usize,

    pub cost_above_cheapest: Cost,
}

/// Tariffs ordered by annual cost at a specific consumption, cheapest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, derive_more::Deref, derive_more::IntoIterator)]
#[must_use]
pub struct Ranking(#[into_iterator(owned, ref)] Vec<RankedTariff>);

impl Ranking {
    #[must_use]
    pub fn cheapest(&self) -> Option<&RankedTariff> {
        self.0.first()
    }

    /// How much one saves by picking the cheapest tariff over the most expensive one.
    pub fn potential_savings(&self) -> Cost {
        self.0.last().map_or(Cost::ZERO, |most_expensive| most_expensive.cost_above_cheapest)
    }
}

/// Sort key: cost first, identifier breaks ties.
fn by_cost_then_id(cost: Cost, tariff: &Tariff) -> (Cost, &TariffId) {
    (cost, &tariff.id)
}

/// Rank all the tariffs by annual cost at the given consumption.
///
/// Ties are broken by ascending identifier, so the outcome does not depend on the input order.
#[instrument(skip_all, fields(n_tariffs = tariffs.len(), ?consumption))]
pub fn rank_at(tariffs: &[Tariff], consumption: KilowattHours) -> Ranking {
    let costs = tariffs
        .iter()
        .map(|tariff| (tariff.annual_cost(consumption), tariff))
        .sorted_by(|(lhs_cost, lhs), (rhs_cost, rhs)| {
            by_cost_then_id(*lhs_cost, lhs).cmp(&by_cost_then_id(*rhs_cost, rhs))
        })
        .collect_vec();
    let Some(&(cheapest_cost, _)) = costs.first() else {
        return Ranking::default();
    };
    Ranking(
        costs
            .into_iter()
            .enumerate()
            .map(|(index, (cost, tariff))| RankedTariff {
                tariff_id: tariff.id.clone(),
                cost,
                rank: index + 1,
                cost_above_cheapest: cost - cheapest_cost,
            })
            .collect(),
    )
}

/// Whether `lhs` is ranked above `rhs` at the given consumption.
#[must_use]
pub fn outranks(lhs: &Tariff, rhs: &Tariff, consumption: KilowattHours) -> bool {
    by_cost_then_id(lhs.annual_cost(consumption), lhs)
        < by_cost_then_id(rhs.annual_cost(consumption), rhs)
}

/// The rank-1 tariff at the given consumption, without building the whole ranking.
#[must_use]
pub fn cheapest_at(tariffs: &[Tariff], consumption: KilowattHours) -> Option<&Tariff> {
    tariffs.iter().min_by_key(|tariff| by_cost_then_id(tariff.annual_cost(consumption), *tariff))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::tariff::tests::tariff;

    fn scenario() -> [Tariff; 2] {
        [tariff("a", 0.30, 10.0, 0.0), tariff("b", 0.25, 15.0, 0.0)]
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking.iter().map(|ranked| ranked.tariff_id.as_str()).collect()
    }

    #[test]
    fn test_below_crossover() {
        let ranking = rank_at(&scenario(), 500.0.into());
        assert_eq!(ids(&ranking), ["a", "b"]);
        assert_abs_diff_eq!(ranking[0].cost.0.0, 270.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ranking[1].cost.0.0, 305.0, epsilon = 1e-9);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[1].rank, 2);
        assert_eq!(ranking[0].cost_above_cheapest, Cost::ZERO);
        assert_abs_diff_eq!(ranking[1].cost_above_cheapest.0.0, 35.0, epsilon = 1e-9);
    }

    #[test]
    fn test_above_crossover() {
        let ranking = rank_at(&scenario(), 2000.0.into());
        assert_eq!(ids(&ranking), ["b", "a"]);
        assert_abs_diff_eq!(ranking[0].cost.0.0, 680.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ranking[1].cost.0.0, 720.0, epsilon = 1e-9);
        assert_eq!(cheapest_at(&scenario(), 2000.0.into()).unwrap().id, TariffId::from("b"));
    }

    #[test]
    fn test_outranks() {
        let [a, b] = scenario();
        assert!(outranks(&a, &b, 500.0.into()));
        assert!(outranks(&b, &a, 2000.0.into()));

        // Tied at the crossover, the identifier decides:
        let c = tariff("c", 0.25, 10.0, 0.0);
        let d = tariff("d", 0.25, 10.0, 0.0);
        assert!(outranks(&c, &d, 1200.0.into()));
        assert!(!outranks(&d, &c, 1200.0.into()));
        assert!(!outranks(&c, &c, 1200.0.into()));
    }

    #[test]
    fn test_ties_broken_by_id() {
        let forward = [tariff("b", 0.28, 10.0, 0.0), tariff("a", 0.28, 10.0, 0.0)];
        let backward = [tariff("a", 0.28, 10.0, 0.0), tariff("b", 0.28, 10.0, 0.0)];
        for tariffs in [&forward, &backward] {
            let ranking = rank_at(tariffs, 3500.0.into());
            assert_eq!(ids(&ranking), ["a", "b"]);
            assert_eq!(ranking[0].rank, 1);
            assert_eq!(ranking[1].rank, 2);
            assert_eq!(ranking[1].cost_above_cheapest, Cost::ZERO);
            assert_eq!(cheapest_at(tariffs, 3500.0.into()).unwrap().id, TariffId::from("a"));
        }
    }

    #[test]
    fn test_floored_ties() {
        let tariffs = [tariff("z", 0.30, 10.0, 900.0), tariff("y", 0.25, 10.0, 700.0)];
        let ranking = rank_at(&tariffs, 100.0.into());
        assert_eq!(ids(&ranking), ["y", "z"]);
        assert!(ranking.iter().all(|ranked| ranked.cost == Cost::ZERO));
    }

    #[test]
    fn test_sorted_ascending() {
        let tariffs = [
            tariff("a", 0.30, 10.0, 0.0),
            tariff("b", 0.25, 15.0, 0.0),
            tariff("c", 0.41, 3.5, 120.0),
            tariff("d", 0.19, 22.0, 50.0),
            tariff("e", 0.35, 0.0, 0.0),
        ];
        for consumption in [0.0, 800.0, 1500.0, 3500.0, 8000.0] {
            let ranking = rank_at(&tariffs, consumption.into());
            assert_eq!(ranking.len(), tariffs.len());
            assert_eq!(ranking[0].cost_above_cheapest, Cost::ZERO);
            for (lhs, rhs) in ranking.iter().tuple_windows() {
                assert!((lhs.cost, &lhs.tariff_id) < (rhs.cost, &rhs.tariff_id));
                assert_eq!(lhs.rank + 1, rhs.rank);
            }
        }
    }

    #[test]
    fn test_empty() {
        let ranking = rank_at(&[], 3500.0.into());
        assert!(ranking.is_empty());
        assert_eq!(ranking.cheapest(), None);
        assert_eq!(ranking.potential_savings(), Cost::ZERO);
        assert!(cheapest_at(&[], 3500.0.into()).is_none());
    }

    #[test]
    fn test_single() {
        let ranking = rank_at(&[tariff("a", 0.30, 10.0, 0.0)], 3500.0.into());
        assert_eq!(ids(&ranking), ["a"]);
        assert_eq!(ranking.cheapest().unwrap().rank, 1);
        assert_eq!(ranking.potential_savings(), Cost::ZERO);
    }

    #[test]
    fn test_potential_savings() {
        let ranking = rank_at(&scenario(), 500.0.into());
        assert_abs_diff_eq!(ranking.potential_savings().0.0, 35.0, epsilon = 1e-9);
    }
}
