//! uniform sampling of arbitrary-precision integers

use crate::protocol::error::{Error, Result};
use num_bigint::{BigInt, RandBigInt};
use rand::{CryptoRng, RngCore};

/// source of uniformly distributed integers
///
/// Every cryptographically secure generator is a source; sampling uses
/// rejection, so the result carries no modulo bias.
/// ```
/// use sharding::math::RandomSource;
/// use num_bigint::BigInt;
/// use rand::rngs::OsRng;
///
/// let value = OsRng.uniform(&BigInt::from(1), &BigInt::from(6)).unwrap();
/// assert!(value >= BigInt::from(1) && value <= BigInt::from(6));
/// ```
pub trait RandomSource {
    /// samples from the closed range `[min, max]`
    fn uniform(&mut self, min: &BigInt, max: &BigInt) -> Result<BigInt>;
}

impl<R: RngCore + CryptoRng> RandomSource for R {
    fn uniform(&mut self, min: &BigInt, max: &BigInt) -> Result<BigInt> {
        if min > max {
            return Err(Error::InvalidRange);
        }
        let bound = max + 1u32;
        Ok(self.gen_bigint_range(min, &bound))
    }
}
