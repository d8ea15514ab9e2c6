//! Fixed-point helpers.
//!
//! Amounts are `i128` base units tagged with their decimals. Products that
//! can exceed 128 bits (value × weight, overflow × token count) go through
//! `soroban-fixed-point-math`, which keeps a 256-bit intermediate.

use core::cmp::Ordering;

use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

use crate::constants::{MAX_DECIMALS, MAX_REDEMPTION_RATE, MAX_RESERVED_RATE};

/// Raised when an amount's decimals differ from the terminal's accounting decimals.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecimalMismatch {
    pub provided: u32,
    pub expected: u32,
}

/// `10^decimals`, or `None` past the `i128` range.
pub fn pow10(decimals: u32) -> Option<i128> {
    if decimals > MAX_DECIMALS {
        return None;
    }
    10i128.checked_pow(decimals)
}

/// Rescale `value` from `decimals` to `target_decimals`.
///
/// Scaling up multiplies by the whole factor before anything else so no
/// precision is lost; scaling down is a single truncating division.
pub fn adjust_decimals(value: i128, decimals: u32, target_decimals: u32) -> Option<i128> {
    match target_decimals.cmp(&decimals) {
        Ordering::Equal => Some(value),
        Ordering::Greater => value.checked_mul(pow10(target_decimals - decimals)?),
        Ordering::Less => value.checked_div(pow10(decimals - target_decimals)?),
    }
}

pub fn validate_decimals(decimals: u32, expected: u32) -> Result<(), DecimalMismatch> {
    if decimals != expected {
        return Err(DecimalMismatch {
            provided: decimals,
            expected,
        });
    }
    Ok(())
}

/// Project tokens minted for `value` at `weight` (18 decimals), where
/// `weight_ratio` is what one whole unit of the weight's currency costs in
/// the paid currency (`10^decimals` when they are the same).
pub fn tokens_for(env: &Env, value: i128, weight: i128, weight_ratio: i128) -> i128 {
    if value == 0 || weight == 0 {
        return 0;
    }
    value.fixed_mul_floor(env, &weight, &weight_ratio)
}

/// Split `token_count` into `(beneficiary, reserved)` portions.
pub fn reserved_split(env: &Env, token_count: i128, reserved_rate: u32) -> (i128, i128) {
    if reserved_rate == 0 {
        return (token_count, 0);
    }
    if reserved_rate >= MAX_RESERVED_RATE {
        return (0, token_count);
    }
    let beneficiary = token_count.fixed_mul_floor(
        env,
        &((MAX_RESERVED_RATE - reserved_rate) as i128),
        &(MAX_RESERVED_RATE as i128),
    );
    (beneficiary, token_count - beneficiary)
}

/// Share of `overflow` reclaimable by redeeming `token_count` out of
/// `total_supply` along the redemption bonding curve.
///
/// ```text
/// base    = overflow × count / supply
/// reclaim = base × (rate + count × (MAX − rate) / supply) / MAX
/// ```
pub fn reclaimable_overflow(
    env: &Env,
    overflow: i128,
    token_count: i128,
    total_supply: i128,
    redemption_rate: u32,
) -> i128 {
    if overflow <= 0 || token_count <= 0 || total_supply <= 0 || redemption_rate == 0 {
        return 0;
    }
    if token_count >= total_supply {
        return overflow;
    }

    let base = overflow.fixed_mul_floor(env, &token_count, &total_supply);
    if redemption_rate >= MAX_REDEMPTION_RATE {
        return base;
    }

    let curve = (redemption_rate as i128)
        + token_count.fixed_mul_floor(
            env,
            &((MAX_REDEMPTION_RATE - redemption_rate) as i128),
            &total_supply,
        );
    base.fixed_mul_floor(env, &curve, &(MAX_REDEMPTION_RATE as i128))
}
