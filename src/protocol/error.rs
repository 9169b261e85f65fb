//! errors during sharing and reconstruction

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// a point fails the curve membership check
    #[error("point is not on the curve")]
    InvalidCurvePoint,

    /// modular inverse requested for a non-unit
    #[error("value is not invertible modulo the given modulus")]
    NotInvertible,

    #[error("division by zero")]
    DivisionByZero,

    #[error("{provided} shares provided but {required} are required")]
    InsufficientShares { provided: usize, required: usize },

    #[error("threshold {threshold} is invalid for a group of {group_size}")]
    InvalidThreshold { threshold: usize, group_size: usize },

    #[error("polynomial order {order} is below 1")]
    InvalidOrder { order: usize },

    #[error("modulus must be positive")]
    InvalidModulus,

    /// random sampling bounds are malformed
    #[error("invalid sampling range: min is greater than max")]
    InvalidRange,

    /// a reduction across participants was attempted on a partial set
    #[error("{provided} contributions received but {expected} are expected")]
    IncompleteContributions { provided: usize, expected: usize },

    #[error("share index {0} appears more than once")]
    DuplicateShareIndex(u64),

    #[error("no share index is missing from the group")]
    NoMissingShare,

    #[error("polynomials are defined over different moduli")]
    ModulusMismatch,

    #[error("invalid curve parameters: {0}")]
    InvalidCurveParams(&'static str),

    #[error("malformed curve configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
