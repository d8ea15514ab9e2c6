use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 401,
    NotInitialized = 402,

    // Balance errors
    InsufficientBalance = 420,
    InvalidAmount = 421,
    Overflow = 422,
}
