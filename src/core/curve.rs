use crate::{
    core::{
        domain::ConsumptionDomain,
        tariff::{Tariff, TariffId},
    },
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Annual cost of a single tariff, sampled over the consumption domain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct CostCurve {
    pub tariff_id: TariffId,
    pub points: Vec<(KilowattHours, Cost)>,
}

impl CostCurve {
    pub fn sample(tariff: &Tariff, domain: &ConsumptionDomain) -> Self {
        Self {
            tariff_id: tariff.id.clone(),
            points: domain
                .samples()
                .map(|consumption| (consumption, tariff.annual_cost(consumption)))
                .collect(),
        }
    }
}

/// Sample every tariff over the domain, keeping the input order.
#[must_use]
pub fn cost_curves(tariffs: &[Tariff], domain: &ConsumptionDomain) -> Vec<CostCurve> {
    tariffs.iter().map(|tariff| CostCurve::sample(tariff, domain)).collect()
}
