use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (201-205)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 201,
    /// Contract not initialized
    NotInitialized = 202,

    // ============================================
    // AUTHORIZATION ERRORS (210-215)
    // ============================================
    /// Caller is neither the owner nor one of its operators
    Unauthorized = 210,

    // ============================================
    // PROJECT ERRORS (220-229)
    // ============================================
    /// No project with this ID
    ProjectNotFound = 220,
}
