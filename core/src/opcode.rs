/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, fetched big-endian. Their behavior is cased on:
/// - `(n, _, _, _)` the family; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within families 5 and 8
/// - `(_, _, n, n)` specific behavior within families 0, E and F
///
/// Nibbles not used to determine the operation often (but not always) carry operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an immediate byte that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..=Vx
/// - `(_, _, n, _)` refers to the register Vy
/// - `(_, _, _, n)` a 4-bit immediate; the sprite height for `Dxyn`
pub trait Opcode {
    /// The Opcode's first nibble.
    /// `[f___]`
    fn family(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> usize;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> usize;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;

    /// The raw instruction word
    fn word(&self) -> u16;
}

impl Opcode for u16 {
    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }

    fn word(&self) -> u16 {
        *self
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    const OP: u16 = 0xABCD;

    #[test]
    fn test_family() {
        assert_eq!(OP.family(), 0xA);
        assert_eq!(0x0FFFu16.family(), 0x0);
    }

    #[test]
    fn test_registers() {
        assert_eq!(OP.x(), 0xB);
        assert_eq!(OP.y(), 0xC);
    }

    #[test]
    fn test_immediates() {
        assert_eq!(OP.n(), 0xD);
        assert_eq!(OP.kk(), 0xCD);
        assert_eq!(OP.addr(), 0x0BCD);
    }
}
