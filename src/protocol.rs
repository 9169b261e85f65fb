//! threshold sharing protocols over the scalar field of a curve

pub mod dkg;
pub mod error;
pub mod shamir;

pub use dkg::{joint_key_generation, JointKey, Participant};
pub use shamir::{
    reconstruct_missing_share, reconstruct_secret, reconstruct_share, share_points,
    shares_to_points, Dealer, SecretSharer, Share, ThresholdConfig,
};
