use super::decode::AluOp;
use super::Cpu8080;

impl Cpu8080 {
    /// Apply an accumulator operation from the ALU group.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.add(value, false),
            AluOp::Adc => self.add(value, self.flags.cy),
            AluOp::Sub => self.a = self.sub(value, false),
            AluOp::Sbb => self.a = self.sub(value, self.flags.cy),
            AluOp::Ana => self.ana(value),
            AluOp::Xra => self.xra(value),
            AluOp::Ora => self.ora(value),
            // Flags only; A is left untouched.
            AluOp::Cmp => {
                self.sub(value, false);
            }
        }
    }

    fn add(&mut self, value: u8, carry_in: bool) {
        let a = self.a;
        let carry = carry_in as u8;
        let full = a as u16 + value as u16 + carry as u16;
        let res = full as u8;
        self.flags.ac = (a & 0x0f) + (value & 0x0f) + carry > 0x0f;
        self.flags.cy = full > 0xff;
        self.flags.set_szp(res);
        self.a = res;
    }

    /// Compute `A - value - borrow` and set all five flags. The caller
    /// decides whether the result is stored (SUB/SBB) or dropped (CMP).
    fn sub(&mut self, value: u8, borrow_in: bool) -> u8 {
        let a = self.a;
        let borrow = borrow_in as u8;
        let res = a.wrapping_sub(value).wrapping_sub(borrow);
        self.flags.ac = (a & 0x0f) < (value & 0x0f) + borrow;
        self.flags.cy = (a as u16) < value as u16 + borrow as u16;
        self.flags.set_szp(res);
        res
    }

    fn ana(&mut self, value: u8) {
        let res = self.a & value;
        self.flags.cy = false;
        self.flags.ac = true;
        self.flags.set_szp(res);
        self.a = res;
    }

    fn xra(&mut self, value: u8) {
        let res = self.a ^ value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.flags.set_szp(res);
        self.a = res;
    }

    fn ora(&mut self, value: u8) {
        let res = self.a | value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.flags.set_szp(res);
        self.a = res;
    }

    pub(super) fn inr(&mut self, value: u8) -> u8 {
        let r = value.wrapping_add(1);
        self.flags.ac = value & 0x0f == 0x0f;
        // Carry flag is not affected by INR.
        self.flags.set_szp(r);
        r
    }

    pub(super) fn dcr(&mut self, value: u8) -> u8 {
        let r = value.wrapping_sub(1);
        self.flags.ac = value & 0x0f == 0;
        // Carry flag is not affected by DCR.
        self.flags.set_szp(r);
        r
    }

    pub(super) fn dad(&mut self, value: u16) {
        let res = self.hl() as u32 + value as u32;
        self.flags.cy = res > 0xffff;
        self.set_hl(res as u16);
    }

    pub(super) fn daa(&mut self) {
        let original = self.a;
        let mut value = original as u16;
        if self.flags.ac || original & 0x0f > 0x09 {
            value += 0x06;
        }
        if self.flags.cy || value > 0x99 {
            value += 0x60;
            self.flags.cy = true;
        }
        let res = value as u8;
        self.flags.ac = (original ^ res) & 0x10 != 0;
        self.flags.set_szp(res);
        self.a = res;
    }

    pub(super) fn rlc(&mut self) {
        let bit7 = self.a & 0x80 != 0;
        self.a = self.a.rotate_left(1);
        self.flags.cy = bit7;
    }

    pub(super) fn rrc(&mut self) {
        let bit0 = self.a & 0x01 != 0;
        self.a = self.a.rotate_right(1);
        self.flags.cy = bit0;
    }

    pub(super) fn ral(&mut self) {
        let bit7 = self.a & 0x80 != 0;
        self.a = (self.a << 1) | self.flags.cy as u8;
        self.flags.cy = bit7;
    }

    pub(super) fn rar(&mut self) {
        let bit0 = self.a & 0x01 != 0;
        self.a = (self.a >> 1) | if self.flags.cy { 0x80 } else { 0 };
        self.flags.cy = bit0;
    }
}
