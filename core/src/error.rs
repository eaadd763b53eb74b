use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while executing a program
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The instruction word matches no encoding in its family.
    /// State is left exactly as it was before the fetch.
    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },
}
