/// Reserved rates are expressed out of this denominator (100% = 10,000).
pub const MAX_RESERVED_RATE: u32 = 10_000;
/// Redemption rates are expressed out of this denominator (100% = 10,000).
pub const MAX_REDEMPTION_RATE: u32 = 10_000;

/// Accounting decimals of the native asset, independent of what the caller passes.
pub const NATIVE_DECIMALS: u32 = 18;
/// Decimals of a funding cycle weight.
pub const WEIGHT_DECIMALS: u32 = 18;
/// Largest power of ten representable in an `i128`.
pub const MAX_DECIMALS: u32 = 38;

// Currency ids understood by the price feed.
pub const CURRENCY_NATIVE: u32 = 1;
pub const CURRENCY_USD: u32 = 2;

/// Operator permissions granted on this domain apply to every project.
pub const WILDCARD_DOMAIN: u64 = 0;
/// Permission bitmaps are 128 bits wide.
pub const PERMISSION_INDEX_LIMIT: u32 = 128;

// Storage TTLs, in ledgers (~5 seconds each).
pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;
