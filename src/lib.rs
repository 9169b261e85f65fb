//! Threshold secret sharing over a prime-order elliptic curve group.
//!
//! [`math`] holds the exact integer, curve and polynomial arithmetic;
//! [`protocol`] builds dealer-based Shamir sharing and a dealerless joint
//! key generation on top of it.

pub mod math;
pub mod protocol;

pub use protocol::error::{Error, Result};
