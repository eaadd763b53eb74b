use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_DEPTH,
};

/// The FrameBuffer is indexed as [y][x]; each cell is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry/borrow/collision flag and is clobbered when used as one
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) an 8-bit stack pointer; slots are addressed `sp % 16` so deep recursion wraps
///   around instead of escaping the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down towards zero
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory; accesses wrap at the top
/// - 32x64 byte frame buffer
///
/// ## Input
/// - the down/up status of keys 0..F
/// - the most recently released key, cleared once an `Fx0A` consumes it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub keys: [bool; KEY_COUNT],
    pub last_released_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        // 0x000 - 0x050 holds the sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            keys: [false; KEY_COUNT],
            last_released_key: None,
        }
    }

    /// Reads the byte at `addr`, wrapping past the end of memory
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr) % MEMORY_SIZE]
    }

    /// Writes the byte at `addr`, wrapping past the end of memory
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr) % MEMORY_SIZE] = value;
    }

    /// Reads the big-endian instruction word the pc points at
    pub fn fetch(&self) -> u16 {
        u16::from_be_bytes([self.read(self.pc), self.read(self.pc.wrapping_add(1))])
    }

    /// STACK.push(addr)
    pub fn push(&mut self, addr: u16) {
        self.stack[usize::from(self.sp) % STACK_DEPTH] = addr;
        self.sp = self.sp.wrapping_add(1);
    }

    /// STACK.pop()
    pub fn pop(&mut self) -> u16 {
        self.sp = self.sp.wrapping_sub(1);
        self.stack[usize::from(self.sp) % STACK_DEPTH]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_holds_sprite_sheet() {
        let state = State::new();
        assert_eq!(state.memory[0x000..0x050], SPRITE_SHEET);
        assert!(state.memory[0x050..].iter().all(|&b| b == 0));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), 0xAABB);
    }

    #[test]
    fn test_fetch_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.pc = 0xFFF;
        state.memory[0xFFF] = 0x12;
        assert_eq!(state.fetch(), 0x12F0);
    }

    #[test]
    fn test_write_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.write(0x1000, 0xAB);
        assert_eq!(state.memory[0x000], 0xAB);
        assert_eq!(state.read(0x1000), 0xAB);
    }

    #[test]
    fn test_push_pop() {
        let mut state = State::new();
        state.push(0x123);
        state.push(0x456);
        assert_eq!(state.sp, 2);
        assert_eq!(state.pop(), 0x456);
        assert_eq!(state.pop(), 0x123);
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_stack_overflow_wraps() {
        let mut state = State::new();
        for addr in 0..=STACK_DEPTH as u16 {
            state.push(addr);
        }
        // the 17th push lands back in slot 0
        assert_eq!(state.stack[0], 16);
        assert_eq!(state.stack[1], 1);
        assert_eq!(state.pop(), 16);
    }

    #[test]
    fn test_stack_underflow_wraps() {
        let mut state = State::new();
        state.stack[STACK_DEPTH - 1] = 0xABC;
        assert_eq!(state.pop(), 0xABC);
        assert_eq!(state.sp, 0xFF);
    }
}
