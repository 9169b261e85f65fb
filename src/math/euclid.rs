//! exact integer division and modular inversion over arbitrary-precision integers

use crate::protocol::error::{Error, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// divides rounding toward negative infinity, e.g. `floor_div(-7, 2) == -4`
pub fn floor_div(a: &BigInt, b: &BigInt) -> Result<BigInt> {
    if b.is_zero() {
        return Err(Error::DivisionByZero);
    }
    Ok(a.div_floor(b))
}

/// reduces `a` into the canonical range `[0, modulus)`
///
/// `modulus` must be positive.
pub fn modulo(a: &BigInt, modulus: &BigInt) -> BigInt {
    a.mod_floor(modulus)
}

/// computes `(gcd, x, y)` such that `a * x + b * y == gcd`
///
/// Iterative Bézout recurrence with floored quotients, so negative
/// intermediate remainders stay well-behaved.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt, BigInt)> {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());
    while !r.is_zero() {
        let quotient = floor_div(&old_r, &r)?;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }
    Ok((old_r, old_s, old_t))
}

/// computes `x` in `[0, modulus)` with `a * x ≡ 1 (mod modulus)`
pub fn mod_inverse(a: &BigInt, modulus: &BigInt) -> Result<BigInt> {
    if !modulus.is_positive() {
        return Err(Error::NotInvertible);
    }
    let (gcd, x, _) = extended_gcd(a, modulus)?;
    if !gcd.abs().is_one() {
        return Err(Error::NotInvertible);
    }
    // a unit gcd of -1 flips the sign of the coefficient
    let x = if gcd.is_negative() { -x } else { x };
    Ok(modulo(&x, modulus))
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn int(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[rstest]
    #[case(7, 2, 3)]
    #[case(-7, 2, -4)]
    #[case(7, -2, -4)]
    #[case(-7, -2, 3)]
    #[case(-8, 2, -4)]
    #[case(0, 5, 0)]
    fn floors_toward_negative_infinity(#[case] a: i64, #[case] b: i64, #[case] expected: i64) {
        assert_eq!(floor_div(&int(a), &int(b)).unwrap(), int(expected));
    }

    #[test]
    fn floor_div_by_zero() {
        assert!(matches!(
            floor_div(&int(3), &int(0)),
            Err(Error::DivisionByZero)
        ));
    }

    #[rstest]
    #[case(240, 46)]
    #[case(-240, 46)]
    #[case(17, 1093)]
    #[case(1093, 17)]
    #[case(0, 9)]
    fn bezout_identity_holds(#[case] a: i64, #[case] b: i64) {
        let (gcd, x, y) = extended_gcd(&int(a), &int(b)).unwrap();
        assert_eq!(int(a) * x + int(b) * y, gcd);
        assert_eq!(gcd.abs(), int(a).gcd(&int(b)));
    }

    #[rstest]
    #[case(3, 11, 4)]
    #[case(10, 17, 12)]
    #[case(-3, 11, 7)]
    #[case(1, 1093, 1)]
    fn inverts_units(#[case] a: i64, #[case] modulus: i64, #[case] expected: i64) {
        assert_eq!(mod_inverse(&int(a), &int(modulus)).unwrap(), int(expected));
    }

    #[test]
    fn inverse_of_large_unreduced_value_is_canonical() {
        let modulus = int(1093);
        let a = int(1093) * int(1_000_003) + int(5);
        let inv = mod_inverse(&a, &modulus).unwrap();
        assert!(inv >= int(0) && inv < modulus);
        assert_eq!(modulo(&(a * inv), &modulus), int(1));
    }

    #[rstest]
    #[case(0, 7)]
    #[case(6, 9)]
    #[case(14, 7)]
    fn rejects_non_units(#[case] a: i64, #[case] modulus: i64) {
        assert!(matches!(
            mod_inverse(&int(a), &int(modulus)),
            Err(Error::NotInvertible)
        ));
    }

    #[test]
    fn modulo_is_canonical() {
        assert_eq!(modulo(&int(-1), &int(7)), int(6));
        assert_eq!(modulo(&int(14), &int(7)), int(0));
    }
}
