/// Width of the frame buffer in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// Height of the frame buffer in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;
/// Where program images are installed and where execution begins
pub const PROGRAM_START: u16 = 0x200;

/// Return address slots available to nested calls
pub const STACK_DEPTH: usize = 16;
/// Keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Reference instruction rate in Hz
pub const CPU_FREQUENCY: u32 = 850;
/// Rate at which the delay and sound timers count down in Hz
pub const TIMER_FREQUENCY: u32 = 60;

/// Rows in each glyph of the sprite sheet
pub const FONT_SPRITE_HEIGHT: u8 = 5;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, installed at the bottom of memory.
///
/// Each glyph is 4 pixels wide and 5 rows tall; the high nibble of each byte is a row.
/// ```text
/// 0xF0 ****
/// 0x90 *  *
/// 0x90 *  *
/// 0x90 *  *
/// 0xF0 ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
