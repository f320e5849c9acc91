use crate::{prelude::*, quantity::energy::KilowattHours};

/// Upper bound on the number of sweep samples, so that a tiny resolution cannot stall the sweep.
pub const MAX_SAMPLES: usize = 100_000;

const STEP_TOLERANCE: f64 = 1e-9;

/// Validated consumption domain `[0, max_consumption]` together with the sweep resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct ConsumptionDomain {
    max_consumption: KilowattHours,
    resolution: KilowattHours,
    n_samples: usize,
}

impl ConsumptionDomain {
    #[allow(clippy::cast_precision_loss)]
    pub fn try_new(max_consumption: KilowattHours, resolution: KilowattHours) -> Result<Self> {
        ensure_max_consumption(max_consumption)?;
        ensure!(
            resolution.is_finite() && resolution > KilowattHours::ZERO,
            "`resolution` must be finite and positive, got {resolution:?}",
        );

        // Tolerate representation error, like `0.9 / 0.3 = 2.9999999999999996`:
        let n_steps = ((max_consumption / resolution).0 + STEP_TOLERANCE).floor();
        ensure!(
            n_steps < MAX_SAMPLES as f64,
            "`resolution` {resolution:?} over {max_consumption:?} yields more than {MAX_SAMPLES} samples",
        );
        // The sample at zero is always there, hence the `+ 1`:
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_samples = n_steps as usize + 1;

        Ok(Self { max_consumption, resolution, n_samples })
    }

    pub const fn max_consumption(&self) -> KilowattHours {
        self.max_consumption
    }

    pub const fn resolution(&self) -> KilowattHours {
        self.resolution
    }

    #[must_use]
    pub const fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Sampled consumption points: `0, r, 2r, …`, never exceeding the maximum.
    ///
    /// Each point is computed from its index, so no error accumulates over the sweep.
    #[allow(clippy::cast_precision_loss)]
    pub fn samples(&self) -> impl Iterator<Item = KilowattHours> + use<> {
        let resolution = self.resolution;
        let max_consumption = self.max_consumption;
        (0..self.n_samples).map(move |index| (resolution * index as f64).min(max_consumption))
    }
}

pub fn ensure_max_consumption(max_consumption: KilowattHours) -> Result {
    ensure!(
        max_consumption.is_finite() && max_consumption > KilowattHours::ZERO,
        "`max_consumption` must be finite and positive, got {max_consumption:?}",
    );
    Ok(())
}

/// Point consumption must be finite and non-negative.
pub fn ensure_consumption(consumption: KilowattHours) -> Result {
    ensure!(
        consumption.is_non_negative(),
        "`consumption` must be finite and non-negative, got {consumption:?}",
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_samples() {
        let domain = ConsumptionDomain::try_new(2000.0.into(), 500.0.into()).unwrap();
        assert_eq!(domain.max_consumption(), KilowattHours::from(2000.0));
        assert_eq!(domain.resolution(), KilowattHours::from(500.0));
        assert_eq!(domain.n_samples(), 5);
        assert_eq!(
            domain.samples().collect_vec(),
            [0.0, 500.0, 1000.0, 1500.0, 2000.0].map(KilowattHours::from),
        );
    }

    #[test]
    fn test_samples_unaligned_maximum() {
        let domain = ConsumptionDomain::try_new(1100.0.into(), 250.0.into()).unwrap();
        assert_eq!(
            domain.samples().collect_vec(),
            [0.0, 250.0, 500.0, 750.0, 1000.0].map(KilowattHours::from),
        );
    }

    #[test]
    fn test_samples_fractional_resolution() {
        let domain = ConsumptionDomain::try_new(0.9.into(), 0.3.into()).unwrap();
        assert_eq!(domain.n_samples(), 4);
        assert_abs_diff_eq!(domain.samples().last().unwrap().0.0, 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_resolution_above_maximum() {
        let domain = ConsumptionDomain::try_new(100.0.into(), 250.0.into()).unwrap();
        assert_eq!(domain.samples().collect_vec(), [KilowattHours::ZERO]);
    }

    #[test]
    fn test_invalid_maximum() {
        for max_consumption in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let error =
                ConsumptionDomain::try_new(max_consumption.into(), 100.0.into()).unwrap_err();
            assert!(error.to_string().contains("`max_consumption`"), "{error}");
        }
    }

    #[test]
    fn test_invalid_resolution() {
        for resolution in [0.0, -250.0, f64::NAN] {
            let error = ConsumptionDomain::try_new(8000.0.into(), resolution.into()).unwrap_err();
            assert!(error.to_string().contains("`resolution`"), "{error}");
        }
    }

    #[test]
    fn test_too_many_samples() {
        assert!(ConsumptionDomain::try_new(8000.0.into(), 0.001.into()).is_err());
        assert!(ConsumptionDomain::try_new(8000.0.into(), 0.1.into()).is_ok());
    }

    #[test]
    fn test_ensure_consumption() {
        assert!(ensure_consumption(KilowattHours::ZERO).is_ok());
        assert!(ensure_consumption(3500.0.into()).is_ok());
        assert!(ensure_consumption((-1.0).into()).is_err());
        assert!(ensure_consumption(f64::NAN.into()).is_err());
    }
}
