use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chip8_core::constants::CPU_FREQUENCY;
use chip8_core::Config;

mod beeper;
mod keymap;
mod run;

/// Runs a Chip-8 program in an SDL2 window
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the program image
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = CPU_FREQUENCY)]
    frequency: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Never play the tone
    #[arg(short, long)]
    mute: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config {
        cpu_frequency: args.frequency.max(1),
        seed: args.seed,
        ..Config::default()
    };

    run::run(run::Options {
        rom: args.rom,
        config,
        scale: args.scale.max(1),
        mute: args.mute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["chip8", "game.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("game.ch8"));
        assert_eq!(args.frequency, 850);
        assert_eq!(args.scale, 10);
        assert!(!args.mute);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "chip8", "--frequency", "500", "-s", "4", "--mute", "--seed", "9", "pong.ch8",
        ])
        .unwrap();
        assert_eq!(args.frequency, 500);
        assert_eq!(args.scale, 4);
        assert!(args.mute);
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn test_args_require_rom() {
        assert!(Args::try_parse_from(["chip8"]).is_err());
    }
}
