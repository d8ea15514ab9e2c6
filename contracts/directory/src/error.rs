use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (301-305)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 301,
    /// Contract not initialized
    NotInitialized = 302,

    // ============================================
    // AUTHORIZATION ERRORS (310-315)
    // ============================================
    /// Caller is not the owner, an operator, or the project's controller
    Unauthorized = 310,

    // ============================================
    // TERMINAL ERRORS (320-329)
    // ============================================
    /// The same terminal appears twice in the list
    DuplicateTerminals = 320,
    /// Terminal does not accept the token it would be primary for
    TokenNotAccepted = 321,
}
