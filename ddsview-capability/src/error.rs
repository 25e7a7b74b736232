use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapabilityError {
    /// The library or entry point backing this capability does not exist on
    /// this system. Permanent for the process lifetime.
    #[error("the requested capability is not present on this system")]
    NotPresent,
    /// The entry point exists but the call itself failed.
    #[error("native call failed")]
    Native(#[from] windows::core::Error),
}
