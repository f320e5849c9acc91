use std::fmt::{Debug, Formatter};

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, fee::MonthlyFee, rate::KilowattHourRate},
};

/// Opaque tariff identifier, only used for identity and tie-breaking.
#[derive(
    Clone,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TariffId(String);

impl TariffId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TariffId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Debug for TariffId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Builder, Deserialize, Serialize)]
#[builder(on(String, into), on(TariffId, into))]
pub struct Tariff {
    pub id: TariffId,

    pub name: String,

    #[serde(default, alias = "anbieter")]
    pub provider: Option<String>,

    /// Price per consumed kilowatt-hour («Arbeitspreis»).
    #[serde(rename = "unit_price_per_kwh", alias = "unit_price", alias = "arbeitspreis")]
    pub unit_price: KilowattHourRate,

    /// Fixed monthly fee («Grundpreis»).
    #[serde(rename = "base_price_per_month", alias = "base_price", alias = "grundpreis")]
    pub base_price: MonthlyFee,

    /// One-time credit subtracted from the first-year cost («Prämie»).
    #[serde(default, alias = "praemie")]
    #[builder(default)]
    pub bonus: Cost,

    #[serde(default, alias = "vertragslaufzeit")]
    pub contract_months: Option<u16>,

    #[serde(default, alias = "preisgarantie")]
    pub price_guarantee_months: Option<u16>,
}

impl Tariff {
    /// Affine annual cost, which may go negative when the bonus outweighs everything else.
    pub fn unfloored_annual_cost(&self, consumption: KilowattHours) -> Cost {
        consumption * self.unit_price + self.base_price.annual() - self.bonus
    }

    /// Annual cost at the given consumption, never below zero.
    pub fn annual_cost(&self, consumption: KilowattHours) -> Cost {
        self.unfloored_annual_cost(consumption).max(Cost::ZERO)
    }

    /// Check that every price field is finite and non-negative.
    pub fn validate(&self) -> Result {
        ensure!(
            self.unit_price.is_non_negative(),
            "`unit_price` must be finite and non-negative, got {:?}",
            self.unit_price,
        );
        ensure!(
            self.base_price.is_non_negative(),
            "`base_price` must be finite and non-negative, got {:?}",
            self.base_price,
        );
        ensure!(
            self.bonus.is_non_negative(),
            "`bonus` must be finite and non-negative, got {:?}",
            self.bonus,
        );
        Ok(())
    }
}

/// Partial update of a tariff, unset fields are kept as they are.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct TariffPatch {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub unit_price: Option<KilowattHourRate>,
    pub base_price: Option<MonthlyFee>,
    pub bonus: Option<Cost>,
    pub contract_months: Option<u16>,
    pub price_guarantee_months: Option<u16>,
}

impl TariffPatch {
    pub fn apply_to(self, tariff: &mut Tariff) {
        if let Some(name) = self.name {
            tariff.name = name;
        }
        if let Some(provider) = self.provider {
            tariff.provider = Some(provider);
        }
        if let Some(unit_price) = self.unit_price {
            tariff.unit_price = unit_price;
        }
        if let Some(base_price) = self.base_price {
            tariff.base_price = base_price;
        }
        if let Some(bonus) = self.bonus {
            tariff.bonus = bonus;
        }
        if let Some(contract_months) = self.contract_months {
            tariff.contract_months = Some(contract_months);
        }
        if let Some(price_guarantee_months) = self.price_guarantee_months {
            tariff.price_guarantee_months = Some(price_guarantee_months);
        }
    }
}
