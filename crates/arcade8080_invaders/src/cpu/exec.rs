use super::decode::{Condition, Instruction, Operand, RegPair};
use super::flags::Flags;
use super::{Cpu8080, PortIo};
use crate::memory::Memory;

impl Cpu8080 {
    /// Carry out the effect of one decoded instruction. The opcode byte has
    /// already been fetched; immediates are fetched here.
    pub(super) fn execute(&mut self, instr: Instruction, mem: &mut Memory, io: &mut dyn PortIo) {
        match instr {
            Instruction::Nop => {}
            Instruction::Hlt => self.halted = true,

            Instruction::Mov { dst, src } => {
                let value = self.read_operand(mem, src);
                self.write_operand(mem, dst, value);
            }
            Instruction::Mvi(dst) => {
                let value = self.fetch_byte(mem);
                self.write_operand(mem, dst, value);
            }
            Instruction::Lxi(rp) => {
                let value = self.fetch_word(mem);
                self.set_pair(rp, value);
            }
            Instruction::Ldax(rp) => self.a = mem.read(self.pair(rp)),
            Instruction::Stax(rp) => mem.write(self.pair(rp), self.a),
            Instruction::Lda => {
                let addr = self.fetch_word(mem);
                self.a = mem.read(addr);
            }
            Instruction::Sta => {
                let addr = self.fetch_word(mem);
                mem.write(addr, self.a);
            }
            Instruction::Lhld => {
                let addr = self.fetch_word(mem);
                self.l = mem.read(addr);
                self.h = mem.read(addr.wrapping_add(1));
            }
            Instruction::Shld => {
                let addr = self.fetch_word(mem);
                mem.write(addr, self.l);
                mem.write(addr.wrapping_add(1), self.h);
            }
            Instruction::Xchg => {
                core::mem::swap(&mut self.d, &mut self.h);
                core::mem::swap(&mut self.e, &mut self.l);
            }
            Instruction::Xthl => {
                // L <-> (SP), H <-> (SP+1)
                let top = mem.read_word(self.sp);
                mem.write_word(self.sp, self.hl());
                self.set_hl(top);
            }
            Instruction::Sphl => self.sp = self.hl(),
            Instruction::Pchl => self.pc = self.hl(),

            Instruction::Inr(reg) => {
                let r = self.inr(self.read_operand(mem, reg));
                self.write_operand(mem, reg, r);
            }
            Instruction::Dcr(reg) => {
                let r = self.dcr(self.read_operand(mem, reg));
                self.write_operand(mem, reg, r);
            }
            Instruction::Inx(rp) => self.set_pair(rp, self.pair(rp).wrapping_add(1)),
            Instruction::Dcx(rp) => self.set_pair(rp, self.pair(rp).wrapping_sub(1)),
            Instruction::Dad(rp) => self.dad(self.pair(rp)),
            Instruction::Alu { op, src } => {
                let value = self.read_operand(mem, src);
                self.alu(op, value);
            }
            Instruction::AluImm(op) => {
                let imm = self.fetch_byte(mem);
                self.alu(op, imm);
            }
            Instruction::Daa => self.daa(),
            Instruction::Rlc => self.rlc(),
            Instruction::Rrc => self.rrc(),
            Instruction::Ral => self.ral(),
            Instruction::Rar => self.rar(),
            Instruction::Cma => self.a = !self.a,
            Instruction::Stc => self.flags.cy = true,
            Instruction::Cmc => self.flags.cy = !self.flags.cy,

            Instruction::Jmp => self.pc = self.fetch_word(mem),
            Instruction::Jcc(cond) => {
                let addr = self.fetch_word(mem);
                if self.condition(cond) {
                    self.pc = addr;
                }
            }
            Instruction::Call => {
                let addr = self.fetch_word(mem);
                self.call(mem, addr);
            }
            Instruction::Ccc(cond) => {
                let addr = self.fetch_word(mem);
                if self.condition(cond) {
                    self.call(mem, addr);
                }
            }
            Instruction::Ret => self.pc = self.pop(mem),
            Instruction::Rcc(cond) => {
                if self.condition(cond) {
                    self.pc = self.pop(mem);
                }
            }
            Instruction::Rst(n) => self.call(mem, u16::from(n) << 3),
            Instruction::Push(rp) => self.push(mem, self.pair(rp)),
            Instruction::Pop(rp) => {
                let value = self.pop(mem);
                self.set_pair(rp, value);
            }

            Instruction::In => {
                let port = self.fetch_byte(mem);
                self.a = io.port_in(port);
            }
            Instruction::Out => {
                let port = self.fetch_byte(mem);
                io.port_out(port, self.a);
            }
            Instruction::Ei => self.enable_interrupts(),
            Instruction::Di => self.disable_interrupts(),
        }
    }

    fn read_operand(&self, mem: &Memory, operand: Operand) -> u8 {
        match operand {
            Operand::B => self.b,
            Operand::C => self.c,
            Operand::D => self.d,
            Operand::E => self.e,
            Operand::H => self.h,
            Operand::L => self.l,
            Operand::M => mem.read(self.hl()),
            Operand::A => self.a,
        }
    }

    fn write_operand(&mut self, mem: &mut Memory, operand: Operand, value: u8) {
        match operand {
            Operand::B => self.b = value,
            Operand::C => self.c = value,
            Operand::D => self.d = value,
            Operand::E => self.e = value,
            Operand::H => self.h = value,
            Operand::L => self.l = value,
            Operand::M => mem.write(self.hl(), value),
            Operand::A => self.a = value,
        }
    }

    /// Read a register pair. For `PSW` the low byte is the packed flags.
    pub fn pair(&self, rp: RegPair) -> u16 {
        match rp {
            RegPair::BC => self.bc(),
            RegPair::DE => self.de(),
            RegPair::HL => self.hl(),
            RegPair::SP => self.sp,
            RegPair::PSW => self.psw(),
        }
    }

    pub fn set_pair(&mut self, rp: RegPair, value: u16) {
        match rp {
            RegPair::BC => self.set_bc(value),
            RegPair::DE => self.set_de(value),
            RegPair::HL => self.set_hl(value),
            RegPair::SP => self.sp = value,
            RegPair::PSW => self.set_psw(value),
        }
    }

    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.to_u8()])
    }

    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.flags = Flags::from_u8(f);
    }

    fn condition(&self, cond: Condition) -> bool {
        match cond {
            Condition::NotZero => !self.flags.z,
            Condition::Zero => self.flags.z,
            Condition::NoCarry => !self.flags.cy,
            Condition::Carry => self.flags.cy,
            Condition::ParityOdd => !self.flags.p,
            Condition::ParityEven => self.flags.p,
            Condition::Plus => !self.flags.s,
            Condition::Minus => self.flags.s,
        }
    }

    fn call(&mut self, mem: &mut Memory, addr: u16) {
        self.push(mem, self.pc);
        self.pc = addr;
    }
}
