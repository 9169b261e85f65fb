//! the secp256k1 parameter set and interop with `k256`

use super::{CurveParams, Point};
use crate::protocol::error::{Error, Result};
use k256::{
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
    EncodedPoint, FieldBytes, PublicKey,
};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

const P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
const N: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
const GX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GY: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

const COORDINATE_BYTES: usize = 32;

fn hex(digits: &str) -> BigInt {
    BigInt::parse_bytes(digits.as_bytes(), 16).unwrap_or_default()
}

impl CurveParams {
    /// the secp256k1 curve: `a = 0`, `b = 7`, cofactor 1
    pub fn secp256k1() -> Self {
        Self {
            name: "secp256k1".to_owned(),
            p: hex(P),
            a: BigInt::zero(),
            b: BigInt::from(7),
            g: Point::Affine { x: hex(GX), y: hex(GY) },
            n: hex(N),
            h: BigInt::one(),
        }
    }
}

fn to_field_bytes(value: &BigInt) -> Result<FieldBytes> {
    let (sign, bytes) = value.to_bytes_be();
    if sign == Sign::Minus || bytes.len() > COORDINATE_BYTES {
        return Err(Error::InvalidCurvePoint);
    }
    let mut padded = [0u8; COORDINATE_BYTES];
    padded[COORDINATE_BYTES - bytes.len()..].copy_from_slice(&bytes);
    Ok(padded.into())
}

/// converts an affine secp256k1 point into a `k256` public key
///
/// The identity has no public key encoding and is rejected.
pub fn to_public_key(point: &Point) -> Result<PublicKey> {
    let (x, y) = point.coordinates().ok_or(Error::InvalidCurvePoint)?;
    let encoded =
        EncodedPoint::from_affine_coordinates(&to_field_bytes(x)?, &to_field_bytes(y)?, false);
    Option::from(PublicKey::from_encoded_point(&encoded)).ok_or(Error::InvalidCurvePoint)
}

/// converts a `k256` public key into an affine point
pub fn from_public_key(key: &PublicKey) -> Result<Point> {
    let encoded = key.to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok(Point::Affine {
            x: BigInt::from_bytes_be(Sign::Plus, x),
            y: BigInt::from_bytes_be(Sign::Plus, y),
        }),
        _ => Err(Error::InvalidCurvePoint),
    }
}

#[test]
fn test_generator_round_trips_through_k256() {
    use k256::{AffinePoint, ProjectivePoint};

    let curve = CurveParams::secp256k1();
    assert!(curve.is_on_curve(curve.generator()));
    let key = to_public_key(curve.generator()).unwrap();
    let expected = PublicKey::from_affine(AffinePoint::from(ProjectivePoint::GENERATOR)).unwrap();
    assert_eq!(key, expected);
    assert_eq!(from_public_key(&key).unwrap(), *curve.generator());
    assert!(to_public_key(&Point::Identity).is_err());
}
