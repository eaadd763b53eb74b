use rand::RngCore;

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A handler for a single instruction; it owns advancing the pc
pub type Operation = fn(op: &dyn Opcode, state: &mut State, rng: &mut dyn RngCore);

/// Selects the correct Operation for a given Opcode
///
/// # Arguments
/// * `op` the instruction word
/// * `address` where `op` was fetched from, reported if it is unknown
pub fn from_op(op: &dyn Opcode, address: u16) -> Result<Operation> {
    let operation: Operation = match (op.family(), op.n(), op.kk()) {
        (0x0, _, 0xE0) => clr,
        (0x0, _, 0xEE) => rts,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, 0x0, _) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, 0x0, _) => mv,
        (0x8, 0x1, _) => or,
        (0x8, 0x2, _) => and,
        (0x8, 0x3, _) => xor,
        (0x8, 0x4, _) => addr,
        (0x8, 0x5, _) => sub,
        (0x8, 0x6, _) => shr,
        (0x8, 0x7, _) => subn,
        (0x8, 0xE, _) => shl,
        (0x9, ..) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, _, 0x9E) => skpr,
        (0xE, _, 0xA1) => skup,
        (0xF, _, 0x07) => moved,
        (0xF, _, 0x0A) => keyd,
        (0xF, _, 0x15) => loads,
        (0xF, _, 0x18) => ld,
        (0xF, _, 0x1E) => addi,
        (0xF, _, 0x29) => ldspr,
        (0xF, _, 0x33) => bcd,
        (0xF, _, 0x55) => stor,
        (0xF, _, 0x65) => read,
        _ => {
            return Err(Error::UnknownOpcode {
                opcode: op.word(),
                address,
            })
        }
    };
    Ok(operation)
}
