pub mod app;
pub mod cpu;
pub mod machine;
pub mod memory;
pub mod rom;
pub mod video;

pub use app::SpaceInvadersApp;
pub use cpu::{Cpu8080, PortIo};
pub use machine::{Button, DipConfig, FrameReport, MachineConfig, SpaceInvadersMachine};
pub use memory::Memory;
pub use rom::{LoadError, RomSet};
pub use video::Palette;

/// Logical screen width in pixels (Space Invaders is 224x256, rotated).
pub const SCREEN_WIDTH: usize = 224;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 256;
/// Default integer scaling factor for the SDL2 frontend.
pub const SCREEN_SCALE: u32 = 3;
