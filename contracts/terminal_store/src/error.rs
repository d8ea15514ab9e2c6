use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 701,
    NotInitialized = 702,

    // Accounting context errors
    AccountingContextNotFound = 710,
    AccountingContextAlreadySet = 711,
    IncorrectDecimalAmount = 712,
    InvalidDecimals = 713,
    InvalidAmount = 714,

    // Funding cycle state errors
    InvalidFundingCycle = 720,
    FundingCyclePaymentPaused = 721,
    FundingCycleRedeemPaused = 722,

    // Balance errors
    InvalidAmountToSendDelegate = 730,
    InsufficientTokens = 731,
    InadequateTerminalStoreBalance = 732,
    ControllerNotFound = 733,

    // Arithmetic errors
    Overflow = 740,
}
