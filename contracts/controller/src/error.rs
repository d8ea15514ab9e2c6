use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 601,
    NotInitialized = 602,

    // Authorization errors
    Unauthorized = 610,

    // Validation errors
    ZeroTokensToMint = 620,
    ZeroTokensToBurn = 621,
    InvalidDistributionLimit = 622,

    // Funding cycle state errors
    MintNotAllowed = 630,
    BurnPaused = 631,

    // Arithmetic errors
    Overflow = 640,
}
