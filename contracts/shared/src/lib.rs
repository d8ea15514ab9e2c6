//! Shared vocabulary of the treasury protocol contracts.
//!
//! Every contract in the workspace depends on this crate for the
//! cross-contract types, the protocol constants, the fixed-point helpers and
//! the generated clients of its collaborators. The crate holds no contract of
//! its own, so linking it into a contract adds no exported entry points.

#![no_std]

pub mod constants;
pub mod fixed_point;
pub mod interfaces;
pub mod metadata;
pub mod permissions;
pub mod types;

pub use metadata::FundingCycleMetadata;
pub use types::*;
