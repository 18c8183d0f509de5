//! Intel 8080 instruction interpreter.
//!
//! The CPU owns only its register file. Memory and the I/O port capability
//! are lent to it for each call, so the machine that owns all three can keep
//! them as plain fields.

mod alu;
mod cycles;
mod decode;
mod exec;
mod flags;


pub use cycles::CYCLES;
pub use decode::{AluOp, Condition, Instruction, Operand, RegPair, DECODE};
pub use flags::{parity, Flags};

use crate::memory::Memory;

/// Port-level I/O seen by `IN` and `OUT`.
///
/// The CPU knows nothing about the board it runs on; machines implement this
/// trait to expose their input latches and output devices.
pub trait PortIo {
    fn port_in(&mut self, port: u8) -> u8;
    fn port_out(&mut self, port: u8, value: u8);
}

/// A port space with nothing attached: reads return 0, writes are dropped.
#[derive(Default, Clone, Copy, Debug)]
pub struct NullPorts;

impl PortIo for NullPorts {
    fn port_in(&mut self, _port: u8) -> u8 {
        0
    }

    fn port_out(&mut self, _port: u8, _value: u8) {}
}

/// Intel 8080 register file and control state.
#[derive(Clone, Debug)]
pub struct Cpu8080 {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
    pub halted: bool,
    pub interrupts_enabled: bool,
}

impl Default for Cpu8080 {
    fn default() -> Self {
        Self {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: 0,
            pc: 0,
            flags: Flags::default(),
            halted: false,
            interrupts_enabled: true,
        }
    }
}

impl Cpu8080 {
    /// Create a new CPU instance in reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every register and flag, leave HALT and accept interrupts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Decoded form of an opcode byte.
    #[inline]
    pub fn decode(opcode: u8) -> Instruction {
        DECODE[opcode as usize]
    }

    /// Fixed clock-state cost of an opcode byte.
    #[inline]
    pub fn cycles(opcode: u8) -> u32 {
        u32::from(CYCLES[opcode as usize])
    }

    /// Execute a single instruction and return the number of cycles consumed.
    ///
    /// A halted CPU does nothing and reports 0 cycles until an interrupt is
    /// accepted.
    pub fn step(&mut self, mem: &mut Memory, io: &mut dyn PortIo) -> u32 {
        if self.halted {
            return 0;
        }
        let opcode = self.fetch_byte(mem);
        self.execute(Self::decode(opcode), mem, io);
        Self::cycles(opcode)
    }

    /// Deliver a maskable interrupt, which behaves like `RST vector`.
    ///
    /// Ignored while interrupts are disabled. Accepting one disables further
    /// interrupts and wakes the CPU from HALT.
    pub fn request_interrupt(&mut self, mem: &mut Memory, vector: u8) {
        if !self.interrupts_enabled {
            return;
        }
        log::debug!("Interrupt RST {} accepted at pc={:#06x}", vector & 0x07, self.pc);
        self.interrupts_enabled = false;
        self.halted = false;
        self.push(mem, self.pc);
        self.pc = u16::from(vector & 0x07) << 3;
    }

    pub fn enable_interrupts(&mut self) {
        self.interrupts_enabled = true;
    }

    pub fn disable_interrupts(&mut self) {
        self.interrupts_enabled = false;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    fn fetch_byte(&mut self, mem: &Memory) -> u8 {
        let b = mem.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    fn fetch_word(&mut self, mem: &Memory) -> u16 {
        let lo = self.fetch_byte(mem);
        let hi = self.fetch_byte(mem);
        u16::from_le_bytes([lo, hi])
    }

    fn push(&mut self, mem: &mut Memory, value: u16) {
        self.sp = self.sp.wrapping_sub(2);
        mem.write_word(self.sp, value);
    }

    fn pop(&mut self, mem: &Memory) -> u16 {
        let value = mem.read_word(self.sp);
        self.sp = self.sp.wrapping_add(2);
        value
    }
}
