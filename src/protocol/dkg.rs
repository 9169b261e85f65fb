//! joint key generation without a trusted dealer
//!
//! Each participant samples a private polynomial of order `threshold - 1`.
//! Participant `j` receives the evaluation at `j` of every polynomial and
//! sums them into its joint share; the joint public key is the sum of every
//! participant's `c0 * G`. The combined secret, the sum of every `c0`, is
//! never formed, except under `cfg(test)` or the `testing` feature.

use super::shamir::{Share, ThresholdConfig};
use crate::math::{modulo, CurveParams, Point, Polynomial, RandomSource, Scalar};
use crate::protocol::error::{Error, Result};
use num_bigint::BigInt;
use num_traits::Zero;

/// one participant of the joint generation with its private polynomial
#[derive(Clone, Debug)]
pub struct Participant {
    id: u64,
    polynomial: Polynomial,
}

impl Participant {
    /// samples the participant's polynomial over the scalar field of `curve`
    pub fn new(
        id: u64,
        curve: &CurveParams,
        config: &ThresholdConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        let polynomial = Polynomial::random(config.polynomial_order(), curve.order(), rng)?;
        log::trace!(
            "participant {} sampled a polynomial of order {}",
            id,
            polynomial.order()
        );
        Ok(Self { id, polynomial })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// evaluation of this participant's polynomial destined for participant `index`
    pub fn share_for(&self, index: u64) -> Scalar {
        self.polynomial.evaluate(&BigInt::from(index))
    }

    /// `c0 * G`, this participant's part of the joint public key
    pub fn public_contribution(&self, curve: &CurveParams) -> Result<Point> {
        curve.scalar_multiply(self.polynomial.constant(), curve.generator())
    }
}

fn ensure_complete(provided: usize, config: &ThresholdConfig) -> Result<()> {
    if provided != config.group_size() {
        return Err(Error::IncompleteContributions {
            provided,
            expected: config.group_size(),
        });
    }
    Ok(())
}

/// sums the evaluations every participant produced for `index`
pub fn combine_shares(
    curve: &CurveParams,
    config: &ThresholdConfig,
    index: u64,
    contributions: &[Scalar],
) -> Result<Share> {
    ensure_complete(contributions.len(), config)?;
    let sum = contributions
        .iter()
        .fold(BigInt::zero(), |acc, value| acc + value);
    Ok(Share::new(index, modulo(&sum, curve.order())))
}

/// sums every participant's public contribution into the joint public key
pub fn combine_public_keys(
    curve: &CurveParams,
    config: &ThresholdConfig,
    contributions: &[Point],
) -> Result<Point> {
    ensure_complete(contributions.len(), config)?;
    contributions
        .iter()
        .try_fold(Point::Identity, |acc, point| curve.add(&acc, point))
}

/// outcome of a joint key generation
#[derive(Clone, Debug)]
pub struct JointKey {
    shares: Vec<Share>,
    public_key: Point,
    #[cfg(any(test, feature = "testing"))]
    secret: Scalar,
}

impl JointKey {
    /// joint shares in participant order, indices `1..=group_size`
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn public_key(&self) -> &Point {
        &self.public_key
    }

    /// the combined secret behind `public_key`
    #[cfg(any(test, feature = "testing"))]
    pub fn secret(&self) -> &Scalar {
        &self.secret
    }
}

/// runs the joint generation for every participant of `config` locally
pub fn joint_key_generation(
    curve: &CurveParams,
    config: &ThresholdConfig,
    rng: &mut impl RandomSource,
) -> Result<JointKey> {
    log::debug!(
        "joint key generation on {} for {} participants with threshold {}",
        curve.name(),
        config.group_size(),
        config.threshold()
    );
    let participants = (1..=config.group_size() as u64)
        .map(|id| Participant::new(id, curve, config, &mut *rng))
        .collect::<Result<Vec<_>>>()?;

    let shares = participants
        .iter()
        .map(|receiver| {
            let contributions: Vec<_> = participants
                .iter()
                .map(|sender| sender.share_for(receiver.id()))
                .collect();
            combine_shares(curve, config, receiver.id(), &contributions)
        })
        .collect::<Result<Vec<_>>>()?;

    let commitments = participants
        .iter()
        .map(|participant| participant.public_contribution(curve))
        .collect::<Result<Vec<_>>>()?;
    let public_key = combine_public_keys(curve, config, &commitments)?;

    #[cfg(any(test, feature = "testing"))]
    let secret = {
        let sum = participants
            .iter()
            .fold(BigInt::zero(), |acc, p| acc + p.polynomial.constant());
        modulo(&sum, curve.order())
    };

    Ok(JointKey {
        shares,
        public_key,
        #[cfg(any(test, feature = "testing"))]
        secret,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::curve::toy_curve;
    use crate::protocol::shamir::reconstruct_secret;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case(3, 2)]
    #[case(5, 3)]
    #[case(6, 6)]
    fn public_key_matches_reconstructed_secret(
        #[case] group_size: usize,
        #[case] threshold: usize,
    ) {
        let curve = toy_curve();
        let config = ThresholdConfig::new(group_size, threshold).unwrap();
        let mut rng = StdRng::seed_from_u64(group_size as u64);
        let key = joint_key_generation(&curve, &config, &mut rng).unwrap();
        assert_eq!(key.shares().len(), group_size);
        assert_eq!(
            *key.public_key(),
            curve
                .scalar_multiply(key.secret(), curve.generator())
                .unwrap()
        );
        for window in key.shares().windows(threshold) {
            assert_eq!(
                reconstruct_secret(&curve, window, threshold).unwrap(),
                *key.secret()
            );
        }
    }

    #[test]
    fn participants_combine_like_local_generation() {
        let curve = toy_curve();
        let config = ThresholdConfig::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let participants: Vec<_> = (1..=3)
            .map(|id| Participant::new(id, &curve, &config, &mut rng).unwrap())
            .collect();

        let share_two = combine_shares(
            &curve,
            &config,
            2,
            &participants.iter().map(|p| p.share_for(2)).collect::<Vec<_>>(),
        )
        .unwrap();
        let expected = participants
            .iter()
            .fold(BigInt::zero(), |acc, p| acc + p.share_for(2));
        assert_eq!(share_two.index, 2);
        assert_eq!(share_two.value, modulo(&expected, curve.order()));
    }

    #[test]
    fn partial_contributions_are_refused() {
        let curve = toy_curve();
        let config = ThresholdConfig::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let participants: Vec<_> = (1..=2)
            .map(|id| Participant::new(id, &curve, &config, &mut rng).unwrap())
            .collect();
        let values: Vec<_> = participants.iter().map(|p| p.share_for(1)).collect();
        assert!(matches!(
            combine_shares(&curve, &config, 1, &values),
            Err(Error::IncompleteContributions {
                provided: 2,
                expected: 3
            })
        ));
        let points: Vec<_> = participants
            .iter()
            .map(|p| p.public_contribution(&curve).unwrap())
            .collect();
        assert!(matches!(
            combine_public_keys(&curve, &config, &points),
            Err(Error::IncompleteContributions { .. })
        ));
    }
}
