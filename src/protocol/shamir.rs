//! threshold secret sharing with a single dealer

use crate::math::{CurveParams, Polynomial, RandomSource, Scalar};
use crate::protocol::error::{Error, Result};
use num_bigint::BigInt;
use num_traits::One;
use std::collections::HashSet;

/// a participant's evaluation of the sharing polynomial
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    /// 1-based participant index, the abscissa of the share
    pub index: u64,
    pub value: Scalar,
}

impl Share {
    pub fn new(index: u64, value: Scalar) -> Self {
        Self { index, value }
    }

    fn point(&self) -> (BigInt, BigInt) {
        (BigInt::from(self.index), self.value.clone())
    }
}

/// (threshold, group size) of a sharing, `2 <= threshold <= group_size`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThresholdConfig {
    group_size: usize,
    threshold: usize,
}

impl ThresholdConfig {
    /// A threshold of one would need a constant polynomial, which is
    /// rejected along with thresholds above the group size.
    pub fn new(group_size: usize, threshold: usize) -> Result<Self> {
        if threshold < 2 || threshold > group_size {
            return Err(Error::InvalidThreshold {
                threshold,
                group_size,
            });
        }
        Ok(Self {
            group_size,
            threshold,
        })
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// order of the sharing polynomial, `threshold - 1`
    pub fn polynomial_order(&self) -> usize {
        self.threshold - 1
    }
}

/// splits secrets into shares and recovers them
pub trait SecretSharer {
    fn split(&mut self, secret: &Scalar) -> Result<Vec<Share>>;
    fn recover(&self, shares: &[Share]) -> Result<Scalar>;
}

/// dealer that knows the secret and hands out one share per participant
///
/// Example:
/// ```
/// use sharding::math::CurveParams;
/// use sharding::protocol::shamir::{Dealer, SecretSharer, ThresholdConfig};
/// use num_bigint::BigInt;
/// use rand::rngs::OsRng;
///
/// let curve = CurveParams::secp256k1();
/// let config = ThresholdConfig::new(5, 3).unwrap();
/// let mut dealer = Dealer::new(&curve, config, OsRng);
/// let secret = BigInt::from(123456789u64);
/// let shares = dealer.split(&secret).unwrap();
/// assert_eq!(dealer.recover(&shares[1..4]).unwrap(), secret);
/// ```
pub struct Dealer<'c, R> {
    curve: &'c CurveParams,
    config: ThresholdConfig,
    rng: R,
}

impl<'c, R: RandomSource> Dealer<'c, R> {
    pub fn new(curve: &'c CurveParams, config: ThresholdConfig, rng: R) -> Self {
        Self { curve, config, rng }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// recovers the share of the lowest index absent from `shares`
    pub fn recover_missing(&self, shares: &[Share]) -> Result<Share> {
        reconstruct_missing_share(self.curve, shares, &self.config)
    }
}

impl<'c, R: RandomSource> SecretSharer for Dealer<'c, R> {
    fn split(&mut self, secret: &Scalar) -> Result<Vec<Share>> {
        let values = share_points(self.curve, secret, &self.config, &mut self.rng)?;
        Ok(shares_to_points(values))
    }

    fn recover(&self, shares: &[Share]) -> Result<Scalar> {
        reconstruct_secret(self.curve, shares, self.config.threshold())
    }
}

/// splits `secret` (taken modulo the curve order) into `group_size` share values
///
/// The value at position `i` belongs to participant `i + 1`.
pub fn share_points(
    curve: &CurveParams,
    secret: &Scalar,
    config: &ThresholdConfig,
    rng: &mut impl RandomSource,
) -> Result<Vec<Scalar>> {
    log::debug!(
        "sharing a secret on {} among {} participants with threshold {}",
        curve.name(),
        config.group_size(),
        config.threshold()
    );
    let max = curve.order() - 1u32;
    let mut coefficients = Vec::with_capacity(config.threshold());
    coefficients.push(secret.clone());
    for _ in 0..config.polynomial_order() {
        coefficients.push(rng.uniform(&BigInt::one(), &max)?);
    }
    let polynomial = Polynomial::new(coefficients, curve.order())?;
    Ok((1..=config.group_size() as u64)
        .map(|index| polynomial.evaluate(&BigInt::from(index)))
        .collect())
}

/// attaches 1-based indices to an ordered list of share values
pub fn shares_to_points(values: Vec<Scalar>) -> Vec<Share> {
    values
        .into_iter()
        .zip(1u64..)
        .map(|(value, index)| Share::new(index, value))
        .collect()
}

fn check_enough(points: &[Share], threshold: usize) -> Result<()> {
    if points.len() < threshold {
        return Err(Error::InsufficientShares {
            provided: points.len(),
            required: threshold,
        });
    }
    Ok(())
}

fn interpolate_at(curve: &CurveParams, points: &[Share], x: u64) -> Result<Scalar> {
    let points: Vec<_> = points.iter().map(Share::point).collect();
    Polynomial::interpolate_evaluate(&points, &BigInt::from(x), curve.order())
}

/// recovers the shared secret from at least `threshold` shares
pub fn reconstruct_secret(curve: &CurveParams, points: &[Share], threshold: usize) -> Result<Scalar> {
    check_enough(points, threshold)?;
    log::debug!(
        "reconstructing a secret on {} from {} shares",
        curve.name(),
        points.len()
    );
    interpolate_at(curve, points, 0)
}

/// recovers the share of participant `index` from at least `threshold` other shares
pub fn reconstruct_share(
    curve: &CurveParams,
    points: &[Share],
    index: u64,
    threshold: usize,
) -> Result<Share> {
    check_enough(points, threshold)?;
    log::debug!(
        "reconstructing share {} on {} from {} shares",
        index,
        curve.name(),
        points.len()
    );
    Ok(Share::new(index, interpolate_at(curve, points, index)?))
}

/// recovers the share of the lowest index in `1..=group_size` absent from `points`
pub fn reconstruct_missing_share(
    curve: &CurveParams,
    points: &[Share],
    config: &ThresholdConfig,
) -> Result<Share> {
    check_enough(points, config.threshold())?;
    let present: HashSet<u64> = points.iter().map(|share| share.index).collect();
    let missing = (1..=config.group_size() as u64)
        .find(|index| !present.contains(index))
        .ok_or(Error::NoMissingShare)?;
    reconstruct_share(curve, points, missing, config.threshold())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::curve::toy_curve;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case(3, 2)]
    #[case(5, 3)]
    #[case(7, 7)]
    #[case(10, 4)]
    fn every_threshold_subset_recovers(#[case] group_size: usize, #[case] threshold: usize) {
        let curve = toy_curve();
        let config = ThresholdConfig::new(group_size, threshold).unwrap();
        let mut rng = StdRng::seed_from_u64(group_size as u64 * 31 + threshold as u64);
        let secret = BigInt::from(777);
        let shares = shares_to_points(share_points(&curve, &secret, &config, &mut rng).unwrap());
        assert_eq!(shares.len(), group_size);
        for window in shares.windows(threshold) {
            assert_eq!(reconstruct_secret(&curve, window, threshold).unwrap(), secret);
        }
        let reversed: Vec<_> = shares.iter().rev().take(threshold).cloned().collect();
        assert_eq!(reconstruct_secret(&curve, &reversed, threshold).unwrap(), secret);
        assert_eq!(reconstruct_secret(&curve, &shares, threshold).unwrap(), secret);
    }

    #[test]
    fn secret_is_reduced_modulo_order() {
        let curve = toy_curve();
        let config = ThresholdConfig::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let shares = shares_to_points(
            share_points(&curve, &BigInt::from(1093 + 5), &config, &mut rng).unwrap(),
        );
        assert_eq!(
            reconstruct_secret(&curve, &shares, 2).unwrap(),
            BigInt::from(5)
        );
    }

    #[test]
    fn too_few_shares_fail() {
        let curve = toy_curve();
        let config = ThresholdConfig::new(5, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let shares = shares_to_points(
            share_points(&curve, &BigInt::from(42), &config, &mut rng).unwrap(),
        );
        assert!(matches!(
            reconstruct_secret(&curve, &shares[..2], 3),
            Err(Error::InsufficientShares {
                provided: 2,
                required: 3
            })
        ));
    }

    #[rstest]
    #[case(3, 4)]
    #[case(3, 1)]
    #[case(3, 0)]
    fn invalid_thresholds_are_rejected(#[case] group_size: usize, #[case] threshold: usize) {
        assert!(matches!(
            ThresholdConfig::new(group_size, threshold),
            Err(Error::InvalidThreshold { .. })
        ));
    }

    #[rstest]
    #[case(&[1, 2], 3)]
    #[case(&[2, 3], 1)]
    #[case(&[1, 3], 2)]
    #[case(&[3, 1, 4], 2)]
    fn missing_share_is_restored(#[case] present: &[u64], #[case] missing: u64) {
        let curve = toy_curve();
        let group_size = present.len() + 1;
        let config = ThresholdConfig::new(group_size, present.len()).unwrap();
        let mut rng = StdRng::seed_from_u64(present.len() as u64);
        let shares = shares_to_points(
            share_points(&curve, &BigInt::from(321), &config, &mut rng).unwrap(),
        );
        let points: Vec<_> = present
            .iter()
            .map(|&index| shares[index as usize - 1].clone())
            .collect();
        let restored = reconstruct_missing_share(&curve, &points, &config).unwrap();
        assert_eq!(restored, shares[missing as usize - 1]);
    }

    #[test]
    fn nothing_to_restore_when_group_is_complete() {
        let curve = toy_curve();
        let config = ThresholdConfig::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let shares = shares_to_points(
            share_points(&curve, &BigInt::from(8), &config, &mut rng).unwrap(),
        );
        assert!(matches!(
            reconstruct_missing_share(&curve, &shares, &config),
            Err(Error::NoMissingShare)
        ));
    }

    #[test]
    fn dealer_splits_and_recovers() {
        let curve = toy_curve();
        let config = ThresholdConfig::new(4, 3).unwrap();
        let mut dealer = Dealer::new(&curve, config, StdRng::seed_from_u64(12));
        let secret = BigInt::from(1000);
        let shares = dealer.split(&secret).unwrap();
        assert_eq!(shares.iter().map(|s| s.index).collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert_eq!(dealer.recover(&shares[1..]).unwrap(), secret);
        let restored = dealer.recover_missing(&shares[1..]).unwrap();
        assert_eq!(restored, shares[0]);
        assert!(dealer.recover(&shares[..2]).is_err());
    }
}
