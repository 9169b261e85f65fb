//! polynomials over a prime scalar field

use super::{
    euclid::{floor_div, mod_inverse, modulo},
    random::RandomSource,
};
use crate::protocol::error::{Error, Result};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use std::{collections::HashSet, fmt};

/// immutable polynomial `c0 + c1*x + ... + cd*x^d` reduced modulo `modulus`
///
/// Always carries at least two coefficients, so its order is at least one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<BigInt>,
    modulus: BigInt,
}

impl Polynomial {
    /// constructs a polynomial from explicit coefficients, lowest degree first
    pub fn new(coefficients: Vec<BigInt>, modulus: &BigInt) -> Result<Self> {
        ensure_positive(modulus)?;
        if coefficients.len() < 2 {
            return Err(Error::InvalidOrder {
                order: coefficients.len().saturating_sub(1),
            });
        }
        let coefficients = coefficients
            .iter()
            .map(|c| modulo(c, modulus))
            .collect();
        Ok(Self {
            coefficients,
            modulus: modulus.clone(),
        })
    }

    /// samples `order + 1` coefficients uniformly from `[1, modulus)`
    pub fn random(order: usize, modulus: &BigInt, rng: &mut impl RandomSource) -> Result<Self> {
        ensure_positive(modulus)?;
        if order < 1 {
            return Err(Error::InvalidOrder { order });
        }
        let max = modulus - 1u32;
        let coefficients = (0..=order)
            .map(|_| rng.uniform(&BigInt::one(), &max))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            coefficients,
            modulus: modulus.clone(),
        })
    }

    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// the constant term, which is the secret in a sharing scheme
    pub fn constant(&self) -> &BigInt {
        &self.coefficients[0]
    }

    /// evaluates the polynomial at `x`
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        if x.is_zero() {
            return self.constant().clone();
        }
        let x = modulo(x, &self.modulus);
        let mut sum = BigInt::zero();
        let mut power = BigInt::one();
        for coefficient in &self.coefficients {
            sum += coefficient * &power;
            power = modulo(&(power * &x), &self.modulus);
        }
        modulo(&sum, &self.modulus)
    }

    /// adds coefficient-wise
    ///
    /// The longer operand's trailing coefficients are carried over unchanged,
    /// which equals zero padding because they are already reduced.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_field(other)?;
        let (long, short) = if self.coefficients.len() >= other.coefficients.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut coefficients = long.coefficients.clone();
        for (coefficient, addend) in coefficients.iter_mut().zip(&short.coefficients) {
            *coefficient = modulo(&(&*coefficient + addend), &self.modulus);
        }
        Ok(Self {
            coefficients,
            modulus: self.modulus.clone(),
        })
    }

    /// multiplies by full convolution
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.ensure_same_field(other)?;
        let mut coefficients = vec![BigInt::zero(); self.order() + other.order() + 1];
        for (i, lhs) in self.coefficients.iter().enumerate() {
            for (j, rhs) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += lhs * rhs;
            }
        }
        for coefficient in coefficients.iter_mut() {
            *coefficient = modulo(coefficient, &self.modulus);
        }
        Ok(Self {
            coefficients,
            modulus: self.modulus.clone(),
        })
    }

    fn ensure_same_field(&self, other: &Self) -> Result<()> {
        if self.modulus == other.modulus {
            Ok(())
        } else {
            Err(Error::ModulusMismatch)
        }
    }

    /// evaluates at `x` the unique polynomial through `points`, reduced modulo `modulus`
    ///
    /// The Lagrange terms are brought over the common denominator `D`, the
    /// product of every per-point denominator, so the sum stays an exact
    /// integer and only `D` is ever inverted.
    pub fn interpolate_evaluate(
        points: &[(BigInt, BigInt)],
        x: &BigInt,
        modulus: &BigInt,
    ) -> Result<BigInt> {
        if points.len() < 2 {
            return Err(Error::InsufficientShares {
                provided: points.len(),
                required: 2,
            });
        }
        let mut abscissas = HashSet::with_capacity(points.len());
        for (xi, _) in points {
            if !abscissas.insert(xi) {
                return Err(Error::DuplicateShareIndex(
                    u64::try_from(xi).unwrap_or(u64::MAX),
                ));
            }
        }

        let mut terms = Vec::with_capacity(points.len());
        let mut common_denominator = BigInt::one();
        for (i, (xi, yi)) in points.iter().enumerate() {
            let mut numerator = yi.clone();
            let mut denominator = BigInt::one();
            for (j, (xj, _)) in points.iter().enumerate() {
                if i != j {
                    numerator *= x - xj;
                    denominator *= xi - xj;
                }
            }
            common_denominator *= &denominator;
            terms.push((numerator, denominator));
        }

        let mut sum = BigInt::zero();
        for (numerator, denominator) in terms {
            sum += floor_div(&(numerator * &common_denominator), &denominator)?;
        }
        let inverse = mod_inverse(&common_denominator, modulus)?;
        Ok(modulo(&(sum * inverse), modulus))
    }
}

fn ensure_positive(modulus: &BigInt) -> Result<()> {
    if modulus.is_positive() {
        Ok(())
    } else {
        Err(Error::InvalidModulus)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficients = self
            .coefficients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "<Polynomial order={}, coefficients=[{}]>",
            self.order(),
            coefficients
        )
    }
}
