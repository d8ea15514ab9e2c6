use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 901,
    NotInitialized = 902,
    DefaultsNotSet = 903,

    // Validation errors
    NoMsgValueAllowed = 920,
    InvalidAmount = 921,

    // Routing errors
    TerminalNotFound = 930,
    IncorrectDecimalAmount = 931,

    // Arithmetic errors
    Overflow = 940,
}
