use std::fmt;
use std::io::{self, Read};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::constants::{KEY_COUNT, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Result;
use crate::instruction::from_op;
use crate::state::{FrameBuffer, State};

/// Called with `true` when the tone should start and `false` when it should stop
pub type SoundCallback = Box<dyn FnMut(bool)>;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the timer cadence, advanced once per executed cycle
///  - whether the tone is currently sounding, to report only its edges
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU
/// - inspecting its frame buffer for rendering by some display
/// - being told when the tone starts and stops
pub struct Chip8 {
    state: State,
    config: Config,
    rng: StdRng,
    timer_accumulator: u32,
    sound_active: bool,
    on_sound: Option<SoundCallback>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Chip8 {
            state: State::new(),
            config,
            rng,
            timer_accumulator: 0,
            sound_active: false,
            on_sound: None,
        }
    }

    /// Registers the callback told about tone edges
    pub fn on_sound(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_sound = Some(Box::new(callback));
        self
    }

    /// Load a rom from a source file
    ///
    /// Installs the sprite sheet and copies the image to `0x200`. Reading stops at the end
    /// of the source or once memory is full; anything past that is left unread.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    ///
    /// # Returns
    /// the number of ROM bytes installed
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> io::Result<usize> {
        self.state.memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        let program = &mut self.state.memory[usize::from(PROGRAM_START)..];
        let mut loaded = 0;
        while loaded < program.len() {
            match reader.read(&mut program[loaded..]) {
                Ok(0) => break,
                Ok(count) => loaded += count,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        debug!(
            bytes = loaded,
            capacity = MEMORY_SIZE - usize::from(PROGRAM_START),
            "installed rom"
        );
        Ok(loaded)
    }

    /// A copy of the frame buffer for rendering
    pub fn display(&self) -> FrameBuffer {
        self.state.frame_buffer
    }

    /// Set the pressed status of a key
    ///
    /// Releasing a key also records it as the latest release for `Fx0A`.
    ///
    /// # Arguments
    /// * `key` the key 0..F; higher bits are ignored
    /// * `pressed` whether the key is now down
    pub fn set_key_state(&mut self, key: u8, pressed: bool) {
        let key = key & (KEY_COUNT as u8 - 1);
        self.state.keys[usize::from(key)] = pressed;
        if !pressed {
            self.state.last_released_key = Some(key);
        }
    }

    /// Advances the CPU by a single cycle
    /// - gets and executes the next opcode
    /// - advances the timers when a timer period has elapsed
    /// - reports a change in the tone
    ///
    /// An unknown opcode leaves every piece of state as it was.
    pub fn step(&mut self) -> Result<()> {
        let op: u16 = self.state.fetch();
        let operation = from_op(&op, self.state.pc).map_err(|e| {
            warn!("{}", e);
            e
        })?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        operation(&op, &mut self.state, &mut self.rng);
        // a tone loaded and expired within one cycle still reports both edges
        self.update_sound();

        self.advance_timers();
        self.update_sound();
        Ok(())
    }

    /// Handles the timer cadence
    /// - adds `timer_frequency` to the accumulator every cycle
    /// - decrements the non-zero timers once for each `cpu_frequency` in the accumulator
    fn advance_timers(&mut self) {
        let cpu_frequency = self.config.cpu_frequency.max(1);
        self.timer_accumulator = self
            .timer_accumulator
            .saturating_add(self.config.timer_frequency.max(1));

        let ticks = self.timer_accumulator / cpu_frequency;
        self.timer_accumulator %= cpu_frequency;
        let ticks = u8::try_from(ticks).unwrap_or(u8::MAX);
        self.state.delay_timer = self.state.delay_timer.saturating_sub(ticks);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(ticks);
    }

    /// Fires the sound callback if the tone started or stopped this cycle
    fn update_sound(&mut self) {
        let active = self.state.sound_timer > 0;
        if active == self.sound_active {
            return;
        }
        self.sound_active = active;
        debug!(active, "sound edge");
        if let Some(callback) = self.on_sound.as_mut() {
            callback(active);
        }
    }

    /// Whether the tone is currently sounding
    pub fn is_sound_active(&self) -> bool {
        self.sound_active
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn registers(&self) -> [u8; 16] {
        self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Chip8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chip8")
            .field("pc", &self.state.pc)
            .field("v", &self.state.v)
            .field("i", &self.state.i)
            .field("sp", &self.state.sp)
            .field("config", &self.config)
            .field("sound_active", &self.sound_active)
            .finish_non_exhaustive()
    }
}
