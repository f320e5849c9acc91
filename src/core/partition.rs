use crate::{
    core::{
        crossover::crossover_point,
        domain::ConsumptionDomain,
        ranking::{cheapest_at, outranks},
        tariff::{Tariff, TariffId},
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Consumption range over which a single tariff is the cheapest one.
///
/// Ranges are half-open `[from, to)`, except for the last one, which includes the maximum.
/// No range is ever empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct OptimalRange {
    pub tariff_id: TariffId,
    pub from: KilowattHours,
    pub to: KilowattHours,
}

impl OptimalRange {
    #[must_use]
    pub fn contains(&self, consumption: KilowattHours) -> bool {
        (self.from <= consumption) && (consumption < self.to)
    }
}

/// Narrower final ranges are folded into the previous one, in kilowatt-hours.
const MIN_RANGE_WIDTH: f64 = 1e-6;

/// Bisection steps when locating a switch between samples, enough to exhaust `f64` precision.
const MAX_BISECTIONS: usize = 64;

/// Sweep state: the currently winning tariff and where its range has started.
struct Sweep<'a> {
    winner: &'a Tariff,
    range_start: KilowattHours,
    last_sample: KilowattHours,
}

/// Locate where `challenger` takes over from `incumbent` within `(after, until]`.
///
/// Prefers the exact crossover of the affine costs. When the zero floor makes that point
/// irrelevant, falls back to bisecting the floored costs.
fn switch_point(
    incumbent: &Tariff,
    challenger: &Tariff,
    after: KilowattHours,
    until: KilowattHours,
) -> KilowattHours {
    if let Some(crossover) = crossover_point(incumbent, challenger)
        && (after < crossover)
        && (crossover <= until)
    {
        return crossover;
    }
    let (mut lower, mut upper) = (after, until);
    for _ in 0..MAX_BISECTIONS {
        let middle = (lower + upper) / 2.0;
        if (middle <= lower) || (middle >= upper) {
            break;
        }
        if outranks(challenger, incumbent, middle) {
            upper = middle;
        } else {
            lower = middle;
        }
    }
    upper
}

/// Partition `[0, max_consumption]` into contiguous ranges, each labeled with the cheapest tariff.
///
/// The domain is sampled at its resolution. When the winner changes between two samples,
/// the boundary is placed where the new winner actually takes over in between.
///
/// A tariff that would only take over at the very maximum is tied there with the previous winner
/// (up to rounding), so the previous range gets closed at the maximum instead.
#[instrument(
    skip_all,
    fields(
        n_tariffs = tariffs.len(),
        resolution = ?domain.resolution(),
        n_samples = domain.n_samples(),
    ),
)]
pub fn partition_by_optimal_tariff(
    tariffs: &[Tariff],
    domain: &ConsumptionDomain,
) -> Vec<OptimalRange> {
    let mut ranges = Vec::new();
    let mut sweep: Option<Sweep> = None;

    for sample in domain.samples() {
        let Some(winner) = cheapest_at(tariffs, sample) else {
            // No tariffs at all:
            return ranges;
        };
        let Some(current) = sweep.as_mut() else {
            sweep = Some(Sweep { winner, range_start: KilowattHours::ZERO, last_sample: sample });
            continue;
        };
        if current.winner.id != winner.id {
            let boundary = switch_point(current.winner, winner, current.last_sample, sample);
            trace!(from = %current.winner.id, to = %winner.id, ?boundary, "winner changed");
            ranges.push(OptimalRange {
                tariff_id: current.winner.id.clone(),
                from: current.range_start,
                to: boundary,
            });
            current.winner = winner;
            current.range_start = boundary;
        }
        current.last_sample = sample;
    }

    if let Some(current) = sweep {
        let max_consumption = domain.max_consumption();
        match ranges.last_mut() {
            Some(previous) if (max_consumption - current.range_start).0.0 < MIN_RANGE_WIDTH => {
                trace!(winner = %current.winner.id, "only takes over at the maximum");
                previous.to = max_consumption;
            }
            _ => ranges.push(OptimalRange {
                tariff_id: current.winner.id.clone(),
                from: current.range_start,
                to: max_consumption,
            }),
        }
    }
    debug!(n_ranges = ranges.len(), "partitioned");
    ranges
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;
    use crate::core::{ranking::rank_at, tariff::tests::tariff};

    fn domain(max_consumption: f64, resolution: f64) -> ConsumptionDomain {
        ConsumptionDomain::try_new(max_consumption.into(), resolution.into()).unwrap()
    }

    /// Ranges must tile the whole domain without empty ones, and every sample must fall into
    /// a range of one of its cheapest tariffs.
    fn assert_partition(tariffs: &[Tariff], domain: &ConsumptionDomain, ranges: &[OptimalRange]) {
        assert_eq!(ranges.first().unwrap().from, KilowattHours::ZERO);
        assert_eq!(ranges.last().unwrap().to, domain.max_consumption());
        for range in ranges {
            assert!(range.from < range.to, "empty range: {range:?}");
        }
        for (lhs, rhs) in ranges.iter().tuple_windows() {
            assert_eq!(lhs.to, rhs.from);
            assert_ne!(lhs.tariff_id, rhs.tariff_id);
        }
        for sample in domain.samples() {
            let range = ranges
                .iter()
                .find(|range| range.contains(sample))
                .or_else(|| ranges.last().filter(|range| range.to == sample))
                .unwrap_or_else(|| panic!("{sample:?} is not covered"));
            let tariff = tariffs.iter().find(|tariff| tariff.id == range.tariff_id).unwrap();
            assert_abs_diff_eq!(
                tariff.annual_cost(sample).0.0,
                rank_at(tariffs, sample)[0].cost.0.0,
                epsilon = 1e-6,
            );
        }
    }

    #[test]
    fn test_two_tariffs() {
        let tariffs = [tariff("a", 0.30, 10.0, 0.0), tariff("b", 0.25, 15.0, 0.0)];
        let domain = domain(2000.0, 100.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].tariff_id, TariffId::from("a"));
        assert_eq!(ranges[1].tariff_id, TariffId::from("b"));
        assert_eq!(ranges[0].from, KilowattHours::ZERO);
        assert_abs_diff_eq!(ranges[0].to.0.0, 1200.0, epsilon = 100.0);
        assert_abs_diff_eq!(ranges[1].from.0.0, 1200.0, epsilon = 100.0);
        assert_eq!(ranges[1].to, KilowattHours::from(2000.0));
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_boundary_at_exact_crossover() {
        let tariffs = [tariff("a", 0.30, 10.0, 0.0), tariff("b", 0.25, 15.0, 0.0)];
        let domain = domain(8000.0, 250.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert_eq!(ranges.len(), 2);
        assert_abs_diff_eq!(ranges[0].to.0.0, 1200.0, epsilon = 1e-6);
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_three_tariffs() {
        // a-b at 1200, b-c at 4800:
        let tariffs = [
            tariff("a", 0.30, 10.0, 0.0),
            tariff("b", 0.25, 15.0, 0.0),
            tariff("c", 0.20, 35.0, 0.0),
        ];
        let domain = domain(8000.0, 250.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert_eq!(
            ranges.iter().map(|range| range.tariff_id.as_str()).collect_vec(),
            ["a", "b", "c"],
        );
        assert_abs_diff_eq!(ranges[1].to.0.0, 4800.0, epsilon = 1e-6);
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_dominated_tariff_never_wins() {
        let tariffs = [
            tariff("a", 0.30, 10.0, 0.0),
            tariff("expensive", 0.40, 20.0, 0.0),
            tariff("b", 0.25, 15.0, 0.0),
        ];
        let domain = domain(5000.0, 50.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert!(ranges.iter().all(|range| range.tariff_id != TariffId::from("expensive")));
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_floored_tariffs() {
        let tariffs = [tariff("a", 0.30, 10.0, 1200.0), tariff("b", 0.20, 10.0, 1000.0)];
        let domain = domain(8000.0, 100.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert_eq!(ranges.len(), 2);

        // Tied at zero first, so the identifier decides, then `a` leaves the floor at 3600:
        assert_eq!(ranges[0].tariff_id, TariffId::from("a"));
        assert_eq!(ranges[1].tariff_id, TariffId::from("b"));
        assert_abs_diff_eq!(ranges[0].to.0.0, 3600.0, epsilon = 1e-6);
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_floored_switch_at_last_step() {
        let tariffs = [tariff("a", 0.30, 10.0, 1200.0), tariff("b", 0.20, 10.0, 1000.0)];
        let domain = domain(3610.0, 100.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1].tariff_id, TariffId::from("b"));
        assert_abs_diff_eq!(ranges[1].from.0.0, 3600.0, epsilon = 1e-6);
        assert_eq!(ranges[1].to, KilowattHours::from(3610.0));
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_crossover_at_maximum() {
        // `z` and `a` are tied at 1200, and `a` only wins there by its identifier:
        let tariffs = [tariff("z", 0.30, 10.0, 0.0), tariff("a", 0.25, 15.0, 0.0)];
        let domain = domain(1200.0, 100.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert_eq!(
            ranges,
            [OptimalRange {
                tariff_id: TariffId::from("z"),
                from: KilowattHours::ZERO,
                to: KilowattHours::from(1200.0),
            }],
        );
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_unaligned_maximum() {
        let tariffs = [tariff("a", 0.30, 10.0, 0.0), tariff("b", 0.25, 15.0, 0.0)];
        let domain = domain(1999.0, 500.0);
        let ranges = partition_by_optimal_tariff(&tariffs, &domain);
        assert_eq!(ranges.last().unwrap().to, KilowattHours::from(1999.0));
        assert_partition(&tariffs, &domain, &ranges);
    }

    #[test]
    fn test_single_tariff() {
        let tariffs = [tariff("a", 0.30, 10.0, 0.0)];
        let ranges = partition_by_optimal_tariff(&tariffs, &domain(8000.0, 250.0));
        assert_eq!(
            ranges,
            [OptimalRange {
                tariff_id: TariffId::from("a"),
                from: KilowattHours::ZERO,
                to: KilowattHours::from(8000.0),
            }],
        );
    }

    #[test]
    fn test_no_tariffs() {
        assert!(partition_by_optimal_tariff(&[], &domain(8000.0, 250.0)).is_empty());
    }
}
