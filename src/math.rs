//! provides the arithmetic behind threshold sharing

pub mod curve;
pub mod euclid;
pub mod polynomial;
pub mod random;

pub use curve::{secp256k1, CurveParams, Point};
pub use euclid::{extended_gcd, floor_div, mod_inverse, modulo};
pub use polynomial::Polynomial;
pub use random::RandomSource;

/// arbitrary-precision integer used for every field element
pub type Scalar = num_bigint::BigInt;
