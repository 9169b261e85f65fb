//! short Weierstrass curve arithmetic over a prime coordinate field
//!
//! A [`CurveParams`] value is the whole configuration of the group: every
//! operation is a method on it, so several parameterizations (a production
//! curve and a toy curve in tests, say) can be used side by side.
//!
//! Example:
//! ```
//! use sharding::math::{CurveParams, Point};
//! use num_bigint::BigInt;
//!
//! let curve = CurveParams::secp256k1();
//! let g = curve.generator().clone();
//! let two_g = curve.add(&g, &g).unwrap();
//! assert_eq!(curve.scalar_multiply(&BigInt::from(2), &g).unwrap(), two_g);
//! assert_eq!(curve.scalar_multiply(curve.order(), &g).unwrap(), Point::Identity);
//! ```

use super::euclid::{mod_inverse, modulo};
use crate::protocol::error::{Error, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::Deserialize;
use std::fmt;

pub mod secp256k1;

/// an element of the curve group
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Point {
    /// the point at infinity, neutral element of the group law
    Identity,
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    pub fn affine(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Point::Affine {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    /// get the affine coordinates, `None` for the identity
    pub fn coordinates(&self) -> Option<(&BigInt, &BigInt)> {
        match self {
            Point::Identity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Identity => write!(f, "Identity"),
            Point::Affine { x, y } => write!(f, "({:#x}, {:#x})", x, y),
        }
    }
}

/// parameters of the curve `y^2 = x^3 + a*x + b` over GF(p)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    name: String,
    p: BigInt,
    a: BigInt,
    b: BigInt,
    g: Point,
    n: BigInt,
    h: BigInt,
}

impl CurveParams {
    /// constructs a validated parameter set
    ///
    /// The generator must be an affine point on the curve and must have
    /// order `n`.
    pub fn new(
        name: impl Into<String>,
        p: BigInt,
        a: BigInt,
        b: BigInt,
        g: Point,
        n: BigInt,
        h: BigInt,
    ) -> Result<Self> {
        if p <= BigInt::from(3) {
            return Err(Error::InvalidCurveParams("field modulus must exceed 3"));
        }
        if n <= BigInt::one() {
            return Err(Error::InvalidCurveParams("group order must exceed 1"));
        }
        if !h.is_positive() {
            return Err(Error::InvalidCurveParams("cofactor must be positive"));
        }
        let a = modulo(&a, &p);
        let b = modulo(&b, &p);
        let g = match g {
            Point::Identity => {
                return Err(Error::InvalidCurveParams("generator cannot be the identity"))
            }
            Point::Affine { x, y } => Point::Affine {
                x: modulo(&x, &p),
                y: modulo(&y, &p),
            },
        };
        let curve = Self {
            name: name.into(),
            p,
            a,
            b,
            g,
            n,
            h,
        };
        if !curve.is_on_curve(&curve.g) {
            return Err(Error::InvalidCurveParams("generator is not on the curve"));
        }
        if !curve.multiply_unreduced(&curve.n, &curve.g)?.is_identity() {
            return Err(Error::InvalidCurveParams("generator order differs from n"));
        }
        Ok(curve)
    }

    /// loads a parameter set from a JSON document
    ///
    /// Integers are strings, hexadecimal with a `0x` prefix or decimal:
    /// ```
    /// use sharding::math::CurveParams;
    ///
    /// let curve = CurveParams::from_json(r#"{
    ///     "name": "toy", "p": "1051", "a": "0", "b": "7",
    ///     "g": ["3", "385"], "n": "0x445", "h": "1"
    /// }"#).unwrap();
    /// assert_eq!(curve.name(), "toy");
    /// ```
    pub fn from_json(document: &str) -> Result<Self> {
        let raw: RawCurveParams = serde_json::from_str(document)?;
        Self::new(
            raw.name,
            parse_int(&raw.p)?,
            parse_int(&raw.a)?,
            parse_int(&raw.b)?,
            Point::Affine {
                x: parse_int(&raw.g[0])?,
                y: parse_int(&raw.g[1])?,
            },
            parse_int(&raw.n)?,
            parse_int(&raw.h)?,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// modulus of the coordinate field
    pub fn field_modulus(&self) -> &BigInt {
        &self.p
    }

    /// order of the generator, modulus of the scalar field
    pub fn order(&self) -> &BigInt {
        &self.n
    }

    pub fn generator(&self) -> &Point {
        &self.g
    }

    pub fn cofactor(&self) -> &BigInt {
        &self.h
    }

    /// checks the curve equation; the identity is on the curve by convention
    ///
    /// Coordinates must be canonical, in `[0, p)`.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => {
                if !self.is_coordinate(x) || !self.is_coordinate(y) {
                    return false;
                }
                let lhs = y * y;
                let rhs = x * x * x + &self.a * x + &self.b;
                (lhs - rhs).is_multiple_of(&self.p)
            }
        }
    }

    fn is_coordinate(&self, value: &BigInt) -> bool {
        !value.is_negative() && *value < self.p
    }

    fn ensure_on_curve(&self, point: &Point) -> Result<()> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            Err(Error::InvalidCurvePoint)
        }
    }

    /// computes the additive inverse `(x, -y)`
    pub fn negate(&self, point: &Point) -> Result<Point> {
        self.ensure_on_curve(point)?;
        let result = match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: modulo(&(&self.p - y), &self.p),
            },
        };
        self.ensure_on_curve(&result)?;
        Ok(result)
    }

    /// adds two points with the chord-and-tangent law
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point> {
        self.ensure_on_curve(lhs)?;
        self.ensure_on_curve(rhs)?;
        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (Point::Identity, _) => return Ok(rhs.clone()),
            (_, Point::Identity) => return Ok(lhs.clone()),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                ((x1, y1), (x2, y2))
            }
        };
        if *lhs == self.negate(rhs)? {
            return Ok(Point::Identity);
        }
        let slope = if lhs == rhs {
            let numerator = BigInt::from(3) * x1 * x1 + &self.a;
            numerator * mod_inverse(&(BigInt::from(2) * y1), &self.p)?
        } else {
            (y1 - y2) * mod_inverse(&(x1 - x2), &self.p)?
        };
        let slope = modulo(&slope, &self.p);
        let x3 = modulo(&(&slope * &slope - x1 - x2), &self.p);
        let y3 = modulo(&-(y1 + &slope * (&x3 - x1)), &self.p);
        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// computes `k * point` by double-and-add from the least significant bit
    pub fn scalar_multiply(&self, k: &BigInt, point: &Point) -> Result<Point> {
        self.ensure_on_curve(point)?;
        if point.is_identity() || k.is_multiple_of(&self.n) {
            return Ok(Point::Identity);
        }
        self.multiply_unreduced(k, point)
    }

    /// double-and-add without the `k ≡ 0 (mod n)` shortcut
    fn multiply_unreduced(&self, k: &BigInt, point: &Point) -> Result<Point> {
        if k.is_negative() {
            return self.multiply_unreduced(&-k, &self.negate(point)?);
        }
        let mut result = Point::Identity;
        let mut addend = point.clone();
        let mut k = k.clone();
        while !k.is_zero() {
            if k.is_odd() {
                result = self.add(&result, &addend)?;
            }
            addend = self.add(&addend, &addend)?;
            k >>= 1;
        }
        Ok(result)
    }
}

#[derive(Deserialize)]
struct RawCurveParams {
    name: String,
    p: String,
    a: String,
    b: String,
    g: [String; 2],
    n: String,
    h: String,
}

fn parse_int(text: &str) -> Result<BigInt> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => BigInt::parse_bytes(hex.as_bytes(), 16),
        None => BigInt::parse_bytes(text.as_bytes(), 10),
    };
    parsed.ok_or(Error::InvalidCurveParams("integer is neither hex nor decimal"))
}

/// `y^2 = x^3 + 7` over GF(1051), a group of prime order 1093
#[cfg(test)]
pub(crate) fn toy_curve() -> CurveParams {
    CurveParams::new(
        "toy-1051",
        BigInt::from(1051),
        BigInt::zero(),
        BigInt::from(7),
        Point::affine(3, 385),
        BigInt::from(1093),
        BigInt::one(),
    )
    .unwrap()
}
