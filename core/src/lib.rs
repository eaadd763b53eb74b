pub use chip8::{Chip8, SoundCallback};
pub use config::Config;
pub use error::{Error, Result};

mod chip8;
pub mod config;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
