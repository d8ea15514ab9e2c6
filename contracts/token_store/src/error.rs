use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 501,
    NotInitialized = 502,

    // Authorization errors
    ControllerUnauthorized = 510,
    Unauthorized = 511,

    // Token registration errors
    TokenNotFound = 520,
    ProjectAlreadyHasToken = 521,
    TokenAlreadyInUse = 522,
    TokenNotOwnedByStore = 523,

    // Balance errors
    InsufficientFunds = 530,
    InvalidAmount = 531,
    Overflow = 532,
}
