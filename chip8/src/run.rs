use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use tracing::{error, info};

use chip8_core::{Chip8, Config};
use chip8_display::Display;

use crate::beeper::Beeper;
use crate::keymap::keymap;

/// Refresh rate of the window
const FPS: u32 = 60;

pub struct Options {
    pub rom: PathBuf,
    pub config: Config,
    pub scale: u32,
    pub mute: bool,
}

pub fn run(options: Options) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, options.scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let mut chip8 = Chip8::with_config(options.config);
    if !options.mute {
        let beeper = Beeper::new(&sdl).map_err(|e| anyhow!(e))?;
        chip8 = chip8.on_sound(move |on| beeper.set_playing(on));
    }

    // Load ROM
    let file = File::open(&options.rom)
        .with_context(|| format!("unable to open {}", options.rom.display()))?;
    let mut reader = BufReader::new(file);
    let loaded = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to read {}", options.rom.display()))?;
    info!(rom = %options.rom.display(), bytes = loaded, "loaded ROM");

    // Set initial timing
    let cycle_time = options.config.cycle_duration();
    let cycles_per_frame = options.config.cycles_per_frame(FPS);
    let mut frame_cycles: u32 = 0;
    let mut last_cycle: Instant = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward: bool = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.set_key_state(kc, true),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.set_key_state(kc, false),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if let Err(e) = chip8.step() {
            error!("{}", e);
            return Err(e).context("program halted");
        }

        // Render on a fixed cadence rather than per draw
        frame_cycles += 1;
        if frame_cycles >= cycles_per_frame {
            frame_cycles = 0;
            display.render(&chip8.display()).map_err(|e| anyhow!(e))?;
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quit");
    Ok(())
}
