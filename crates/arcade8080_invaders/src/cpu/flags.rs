/// Condition flags of the Intel 8080.
///
/// When packed into the low byte of the PSW (`PUSH PSW` / `POP PSW`) the
/// layout is:
///
/// | bit | 7 | 6 | 5 | 4  | 3 | 2 | 1 | 0  |
/// |-----|---|---|---|----|---|---|---|----|
/// |     | S | Z | 0 | AC | 0 | P | 1 | CY |
///
/// Bit 1 always reads back as 1 and bits 3 and 5 as 0, whatever was popped.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags {
    pub s: bool,  // sign
    pub z: bool,  // zero
    pub ac: bool, // auxiliary carry
    pub p: bool,  // parity
    pub cy: bool, // carry
}

pub(crate) const SIGN: u8 = 0x80;
pub(crate) const ZERO: u8 = 0x40;
pub(crate) const AUX_CARRY: u8 = 0x10;
pub(crate) const PARITY: u8 = 0x04;
pub(crate) const RESERVED_ONE: u8 = 0x02;
pub(crate) const CARRY: u8 = 0x01;

impl Flags {
    pub fn to_u8(self) -> u8 {
        let mut f = RESERVED_ONE;
        if self.s {
            f |= SIGN;
        }
        if self.z {
            f |= ZERO;
        }
        if self.ac {
            f |= AUX_CARRY;
        }
        if self.p {
            f |= PARITY;
        }
        if self.cy {
            f |= CARRY;
        }
        f
    }

    pub fn from_u8(v: u8) -> Self {
        Self {
            s: v & SIGN != 0,
            z: v & ZERO != 0,
            ac: v & AUX_CARRY != 0,
            p: v & PARITY != 0,
            cy: v & CARRY != 0,
        }
    }

    /// Update sign, zero and parity from an 8-bit result.
    #[inline]
    pub(crate) fn set_szp(&mut self, value: u8) {
        self.s = value & 0x80 != 0;
        self.z = value == 0;
        self.p = parity(value);
    }
}

/// True when `value` has an even number of set bits.
#[inline]
pub const fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}
