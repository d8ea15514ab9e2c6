use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Permission index does not fit the 128-bit bitmap
    PermissionIndexOutOfBounds = 101,
}
