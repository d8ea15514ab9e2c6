use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 801,
    NotInitialized = 802,

    // Authorization errors
    Unauthorized = 810,
    ReentrantCall = 811,

    // Validation errors
    PayToZeroAddress = 820,
    RedeemToZeroAddress = 821,
    ProjectTerminalMismatch = 822,
    TokenNotAccepted = 823,
    NoMsgValueAllowed = 824,
    NoAttachedValue = 825,
    InvalidAmount = 826,
    ControllerNotFound = 827,

    // Slippage errors
    InadequateTokenCount = 830,
    InadequateReclaimAmount = 831,

    // Arithmetic errors
    Overflow = 840,
}
