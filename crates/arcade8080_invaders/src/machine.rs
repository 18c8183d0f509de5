use bitflags::bitflags;
use typed_builder::TypedBuilder;

use crate::cpu::{Cpu8080, PortIo};
use crate::memory::Memory;
use crate::rom::{LoadError, RomSet};

/// 8080 clock and frame timing for Space Invaders.
pub const CPU_CLOCK_HZ: u32 = 2_000_000;
pub const FRAME_RATE_HZ: u32 = 60;
/// Cycles run before each of the two per-frame interrupts (16667, rounded up).
pub const HALF_FRAME_CYCLES: u32 = (CPU_CLOCK_HZ / FRAME_RATE_HZ + 1) / 2;

/// Vector raised at mid-screen and at the start of vertical blank.
pub const MID_SCREEN_VECTOR: u8 = 1;
pub const VBLANK_VECTOR: u8 = 2;

/// Port 0 reads back with bits 1 and 2 set.
const PORT0_FIXED: u8 = 0x06;

bitflags! {
    /// Live bits of input port 1 (`IN 1`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Port1: u8 {
        const COIN = 1 << 0;
        const P2_START = 1 << 1;
        const P1_START = 1 << 2;
        /// Tied high on the board.
        const ALWAYS_ONE = 1 << 3;
        const P1_FIRE = 1 << 4;
        const P1_LEFT = 1 << 5;
        const P1_RIGHT = 1 << 6;
    }
}

/// Bits of input port 2 (`IN 2`) that the DIP switches drive.
const IN2_MASK_SHIPS_PER_CREDIT: u8 = 0x03;
const IN2_BIT_COIN_INFO: u8 = 7;

/// The cabinet inputs wired to port 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    Start1,
    Start2,
    Left,
    Right,
    Fire,
}

impl Button {
    fn mask(self) -> Port1 {
        match self {
            Button::Coin => Port1::COIN,
            Button::Start1 => Port1::P1_START,
            Button::Start2 => Port1::P2_START,
            Button::Left => Port1::P1_LEFT,
            Button::Right => Port1::P1_RIGHT,
            Button::Fire => Port1::P1_FIRE,
        }
    }
}

/// Configuration for the Space Invaders DIP switches that we model.
///
/// - `ships_per_credit`: number of ships per game (3–6), encoded in bits
///   0–1 of port 2 as `value - 3`.
/// - `show_coin_info`: whether the attract mode shows the coin/credit line.
///   The ROM treats bit 7 = 1 as "hide coin info".
///
/// The default configuration leaves every port 2 bit clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DipConfig {
    pub ships_per_credit: u8,
    pub show_coin_info: bool,
}

impl Default for DipConfig {
    fn default() -> Self {
        Self {
            ships_per_credit: 3,
            show_coin_info: true,
        }
    }
}

impl DipConfig {
    /// Port 2 value produced by these switch settings.
    pub fn port2(&self) -> u8 {
        let ships = self.ships_per_credit.clamp(3, 6);
        let mut port2 = (ships - 3) & IN2_MASK_SHIPS_PER_CREDIT;
        if !self.show_coin_info {
            port2 |= 1 << IN2_BIT_COIN_INFO;
        }
        port2
    }
}

/// Machine-level settings fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    /// Cycles executed before each of the two per-frame interrupts.
    #[builder(default = HALF_FRAME_CYCLES)]
    pub half_frame_cycles: u32,
    #[builder(default)]
    pub dip: DipConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Input latches and the external shift register, as seen through `IN`/`OUT`.
#[derive(Clone, Debug)]
pub struct InvadersPorts {
    port0: u8,
    port1: Port1,
    port2: u8,
    shift_data: u16,
    shift_offset: u8,
}

impl InvadersPorts {
    pub fn new(dip: DipConfig) -> Self {
        Self {
            port0: PORT0_FIXED,
            port1: Port1::ALWAYS_ONE,
            port2: dip.port2(),
            shift_data: 0,
            shift_offset: 0,
        }
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.port1.set(button.mask(), pressed);
    }

    pub fn port1(&self) -> Port1 {
        self.port1
    }

    pub fn shift_data(&self) -> u16 {
        self.shift_data
    }

    pub fn shift_offset(&self) -> u8 {
        self.shift_offset
    }

    /// Clear the shift register; buttons and DIP bits are left alone.
    fn reset_shifter(&mut self) {
        self.shift_data = 0;
        self.shift_offset = 0;
    }
}

impl Default for InvadersPorts {
    fn default() -> Self {
        Self::new(DipConfig::default())
    }
}

impl PortIo for InvadersPorts {
    fn port_in(&mut self, port: u8) -> u8 {
        match port {
            0 => self.port0,
            1 => self.port1.bits(),
            2 => self.port2,
            3 => (self.shift_data >> (8 - self.shift_offset)) as u8,
            _ => 0,
        }
    }

    fn port_out(&mut self, port: u8, value: u8) {
        match port {
            2 => self.shift_offset = value & 0x07,
            4 => self.shift_data = (u16::from(value) << 8) | (self.shift_data >> 8),
            // Sound latches (3, 5) and the watchdog (6) are not modelled.
            _ => {}
        }
    }
}

/// Cycles consumed in each half of one `execute_frame` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub first_half: u32,
    pub second_half: u32,
}

impl FrameReport {
    pub fn total(&self) -> u32 {
        self.first_half + self.second_half
    }
}

/// High-level representation of the Space Invaders machine state.
///
/// Holds the Intel 8080 CPU core, the 64 KiB memory and the I/O ports.
#[derive(Clone, Debug)]
pub struct SpaceInvadersMachine {
    cpu: Cpu8080,
    memory: Memory,
    ports: InvadersPorts,
    config: MachineConfig,
    frames: u64,
}

impl SpaceInvadersMachine {
    /// Build a machine with `roms` installed, reset and ready to run.
    pub fn new(roms: &RomSet, config: MachineConfig) -> Result<Self, LoadError> {
        let mut memory = Memory::new();
        roms.install(&mut memory)?;
        log::info!(
            "Space Invaders ROMs installed (half frame = {} cycles, port 2 = {:#04x})",
            config.half_frame_cycles,
            config.dip.port2()
        );

        let mut cpu = Cpu8080::new();
        cpu.reset();
        cpu.enable_interrupts();

        Ok(Self {
            cpu,
            memory,
            ports: InvadersPorts::new(config.dip),
            config,
            frames: 0,
        })
    }

    /// Reset the CPU and shift register, preserving memory and inputs.
    pub fn reset(&mut self) {
        log::debug!("Machine reset after {} frames", self.frames);
        self.cpu.reset();
        self.cpu.enable_interrupts();
        self.ports.reset_shifter();
        self.frames = 0;
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> u32 {
        self.cpu.step(&mut self.memory, &mut self.ports)
    }

    /// Run one video frame: two budgeted half-frames, each followed by an
    /// interrupt (RST 1, then RST 2).
    ///
    /// The budget is a floor: the last instruction of a half-frame may run
    /// past it. A halted CPU ends its half-frame early so the interrupt can
    /// wake it.
    pub fn execute_frame(&mut self) -> FrameReport {
        let first_half = self.run_half_frame();
        self.cpu.request_interrupt(&mut self.memory, MID_SCREEN_VECTOR);
        let second_half = self.run_half_frame();
        self.cpu.request_interrupt(&mut self.memory, VBLANK_VECTOR);

        self.frames += 1;
        log::trace!(
            "frame {}: {} + {} cycles, pc={:#06x}",
            self.frames,
            first_half,
            second_half,
            self.cpu.pc
        );
        FrameReport {
            first_half,
            second_half,
        }
    }

    fn run_half_frame(&mut self) -> u32 {
        let budget = self.config.half_frame_cycles;
        let mut cycles: u32 = 0;
        while cycles < budget {
            let c = self.step();
            if c == 0 {
                break;
            }
            cycles += c;
        }
        cycles
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.ports.set_button(button, pressed);
    }

    pub fn set_coin(&mut self, inserted: bool) {
        self.set_button(Button::Coin, inserted);
    }

    pub fn set_start1(&mut self, pressed: bool) {
        self.set_button(Button::Start1, pressed);
    }

    pub fn set_start2(&mut self, pressed: bool) {
        self.set_button(Button::Start2, pressed);
    }

    pub fn set_left(&mut self, pressed: bool) {
        self.set_button(Button::Left, pressed);
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.set_button(Button::Right, pressed);
    }

    pub fn set_fire(&mut self, pressed: bool) {
        self.set_button(Button::Fire, pressed);
    }

    /// Expose the raw video RAM window used by the renderer.
    ///
    /// 0x1c00 bytes starting at 0x2400.
    pub fn video_ram(&self) -> &[u8] {
        self.memory.video_ram()
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn ports(&self) -> &InvadersPorts {
        &self.ports
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Frames executed since construction or the last reset.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
