use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use arcade8080_invaders::video::frame_checksum;
use arcade8080_invaders::{MachineConfig, Palette, RomSet, SpaceInvadersMachine};

pub const USAGE: &str = "\
usage: arcade8080 <rom-dir-or-file> [--frames N] [--headless] [--overlay]

  <rom-dir-or-file>  directory holding invaders.h/g/f/e, or one 8 KiB image
  --frames N         frames to run in headless mode (default 600)
  --headless         run without a window and print the video RAM checksum
  --overlay          colour the screen like the cabinet's gel overlay";

pub const DEFAULT_HEADLESS_FRAMES: u64 = 600;

/// Command line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub rom_path: PathBuf,
    pub frames: u64,
    pub headless: bool,
    pub palette: Palette,
}

impl Options {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut rom_path = None;
        let mut frames = DEFAULT_HEADLESS_FRAMES;
        let mut headless = false;
        let mut palette = Palette::Monochrome;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => headless = true,
                "--overlay" => palette = Palette::Overlay,
                "--frames" => {
                    let value = args.next().context("--frames needs a value")?;
                    frames = value
                        .parse()
                        .with_context(|| format!("invalid frame count '{value}'"))?;
                }
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
                path => {
                    if rom_path.is_some() {
                        bail!("more than one ROM path given");
                    }
                    rom_path = Some(PathBuf::from(path));
                }
            }
        }

        let rom_path = rom_path.context("no ROM path given")?;
        Ok(Self {
            rom_path,
            frames,
            headless,
            palette,
        })
    }
}

fn load_machine(options: &Options) -> Result<SpaceInvadersMachine> {
    log::info!("Loading ROMs from '{}'", options.rom_path.display());
    let roms = RomSet::from_path(&options.rom_path)
        .with_context(|| format!("loading ROMs from '{}'", options.rom_path.display()))?;
    Ok(SpaceInvadersMachine::new(&roms, MachineConfig::default())?)
}

/// Run `frames` frames with no display and return the final VRAM checksum.
pub fn run_headless(machine: &mut SpaceInvadersMachine, frames: u64) -> u64 {
    let mut cycles: u64 = 0;
    for _ in 0..frames {
        cycles += u64::from(machine.execute_frame().total());
    }
    log::info!("Ran {frames} frames ({cycles} cycles)");
    frame_checksum(machine.video_ram())
}

pub fn run(options: &Options) -> Result<()> {
    let mut machine = load_machine(options)?;

    if !options.headless {
        #[cfg(feature = "sdl")]
        return run_sdl(machine, options.palette);

        #[cfg(not(feature = "sdl"))]
        log::warn!("Built without the `sdl` feature, running headless");
    }

    let checksum = run_headless(&mut machine, options.frames);
    println!("{} frames, vram checksum {checksum:016x}", options.frames);
    Ok(())
}

#[cfg(feature = "sdl")]
pub fn run_sdl(machine: SpaceInvadersMachine, palette: Palette) -> Result<()> {
    use arcade8080_sdl2::{SdlContext, SdlInitInfo};

    let app = arcade8080_invaders::SpaceInvadersApp::new(machine, palette);
    let init_info = SdlInitInfo {
        frame_rate: arcade8080_invaders::machine::FRAME_RATE_HZ,
        ..SdlInitInfo::for_app(&app)
    };
    SdlContext::run(init_info, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_apply_when_only_a_path_is_given() {
        let options = Options::parse(args(&["roms/invaders"])).unwrap();
        assert_eq!(options.rom_path, PathBuf::from("roms/invaders"));
        assert_eq!(options.frames, DEFAULT_HEADLESS_FRAMES);
        assert!(!options.headless);
        assert_eq!(options.palette, Palette::Monochrome);
    }

    #[test]
    fn flags_may_come_in_any_order() {
        let options =
            Options::parse(args(&["--headless", "--frames", "30", "invaders.rom", "--overlay"]))
                .unwrap();
        assert_eq!(options.rom_path, PathBuf::from("invaders.rom"));
        assert_eq!(options.frames, 30);
        assert!(options.headless);
        assert_eq!(options.palette, Palette::Overlay);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(Options::parse(args(&[])).is_err());
        assert!(Options::parse(args(&["a", "b"])).is_err());
        assert!(Options::parse(args(&["a", "--frames"])).is_err());
        assert!(Options::parse(args(&["a", "--frames", "many"])).is_err());
        assert!(Options::parse(args(&["a", "--fast"])).is_err());
    }

    #[test]
    fn headless_run_reports_checksum_of_blank_screen() {
        // JMP 0000 never touches video RAM.
        let mut h = vec![0u8; arcade8080_invaders::rom::ROM_IMAGE_SIZE];
        h[..3].copy_from_slice(&[0xc3, 0x00, 0x00]);
        let blank = vec![0u8; arcade8080_invaders::rom::ROM_IMAGE_SIZE];
        let roms = RomSet::from_images([h, blank.clone(), blank.clone(), blank]).unwrap();
        let mut machine = SpaceInvadersMachine::new(&roms, MachineConfig::default()).unwrap();

        let checksum = run_headless(&mut machine, 3);
        assert_eq!(machine.frame_count(), 3);
        let zeros = vec![0u8; arcade8080_invaders::memory::VRAM_SIZE];
        assert_eq!(checksum, frame_checksum(&zeros));
    }
}
