//! Opcode decoding.
//!
//! Every one of the 256 opcode bytes decodes to an [`Instruction`]. The
//! table is built at compile time, so dispatch is a single index.

/// 8-bit operand selected by a 3-bit register field. `M` is the byte at HL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Operand {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Operand::B,
            1 => Operand::C,
            2 => Operand::D,
            3 => Operand::E,
            4 => Operand::H,
            5 => Operand::L,
            6 => Operand::M,
            _ => Operand::A,
        }
    }
}

/// Register pair selected by bits 4–5. Index 3 means SP for LXI/INX/DCX/DAD
/// and PSW for PUSH/POP, so those two are separate variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegPair {
    BC,
    DE,
    HL,
    SP,
    PSW,
}

impl RegPair {
    const fn with_sp(bits: u8) -> Self {
        match (bits >> 4) & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::SP,
        }
    }

    const fn with_psw(bits: u8) -> Self {
        match (bits >> 4) & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::PSW,
        }
    }
}

/// Branch condition held in bits 3–5 of Jcc/Ccc/Rcc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    const fn from_bits(bits: u8) -> Self {
        match (bits >> 3) & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }
}

/// Accumulator operation held in bits 3–5 of the ALU group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    const fn from_bits(bits: u8) -> Self {
        match (bits >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbb,
            4 => AluOp::Ana,
            5 => AluOp::Xra,
            6 => AluOp::Ora,
            _ => AluOp::Cmp,
        }
    }
}

/// A decoded instruction. Immediate operands are fetched at execution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Hlt,

    // Data transfer
    Mov { dst: Operand, src: Operand },
    Mvi(Operand),
    Lxi(RegPair),
    Ldax(RegPair),
    Stax(RegPair),
    Lda,
    Sta,
    Lhld,
    Shld,
    Xchg,
    Xthl,
    Sphl,
    Pchl,

    // Arithmetic and logic
    Inr(Operand),
    Dcr(Operand),
    Inx(RegPair),
    Dcx(RegPair),
    Dad(RegPair),
    Alu { op: AluOp, src: Operand },
    AluImm(AluOp),
    Daa,
    Rlc,
    Rrc,
    Ral,
    Rar,
    Cma,
    Stc,
    Cmc,

    // Branching and stack
    Jmp,
    Jcc(Condition),
    Call,
    Ccc(Condition),
    Ret,
    Rcc(Condition),
    Rst(u8),
    Push(RegPair),
    Pop(RegPair),

    // Machine control
    In,
    Out,
    Ei,
    Di,
}

/// Decode table indexed by opcode byte.
pub const DECODE: [Instruction; 256] = build_table();

const fn build_table() -> [Instruction; 256] {
    let mut table = [Instruction::Nop; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

const fn decode(op: u8) -> Instruction {
    match op {
        // Undocumented aliases.
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Instruction::Nop,
        0xcb => Instruction::Jmp,
        0xd9 => Instruction::Ret,
        0xdd | 0xed | 0xfd => Instruction::Call,

        0x00 => Instruction::Nop,
        0x76 => Instruction::Hlt,

        0x01 | 0x11 | 0x21 | 0x31 => Instruction::Lxi(RegPair::with_sp(op)),
        0x02 | 0x12 => Instruction::Stax(RegPair::with_sp(op)),
        0x0a | 0x1a => Instruction::Ldax(RegPair::with_sp(op)),
        0x03 | 0x13 | 0x23 | 0x33 => Instruction::Inx(RegPair::with_sp(op)),
        0x0b | 0x1b | 0x2b | 0x3b => Instruction::Dcx(RegPair::with_sp(op)),
        0x09 | 0x19 | 0x29 | 0x39 => Instruction::Dad(RegPair::with_sp(op)),

        0x22 => Instruction::Shld,
        0x2a => Instruction::Lhld,
        0x32 => Instruction::Sta,
        0x3a => Instruction::Lda,

        0x07 => Instruction::Rlc,
        0x0f => Instruction::Rrc,
        0x17 => Instruction::Ral,
        0x1f => Instruction::Rar,
        0x27 => Instruction::Daa,
        0x2f => Instruction::Cma,
        0x37 => Instruction::Stc,
        0x3f => Instruction::Cmc,

        // INR / DCR / MVI share the register field in bits 3–5.
        0x00..=0x3f => match op & 0x07 {
            4 => Instruction::Inr(Operand::from_bits(op >> 3)),
            5 => Instruction::Dcr(Operand::from_bits(op >> 3)),
            _ => Instruction::Mvi(Operand::from_bits(op >> 3)),
        },

        0x40..=0x7f => Instruction::Mov {
            dst: Operand::from_bits(op >> 3),
            src: Operand::from_bits(op),
        },

        0x80..=0xbf => Instruction::Alu {
            op: AluOp::from_bits(op),
            src: Operand::from_bits(op),
        },

        0xc3 => Instruction::Jmp,
        0xc9 => Instruction::Ret,
        0xcd => Instruction::Call,
        0xd3 => Instruction::Out,
        0xdb => Instruction::In,
        0xe3 => Instruction::Xthl,
        0xe9 => Instruction::Pchl,
        0xeb => Instruction::Xchg,
        0xf3 => Instruction::Di,
        0xf9 => Instruction::Sphl,
        0xfb => Instruction::Ei,

        // Remaining 0xC0–0xFF opcodes are grouped by their low three bits.
        _ => match op & 0x07 {
            0 => Instruction::Rcc(Condition::from_bits(op)),
            1 => Instruction::Pop(RegPair::with_psw(op)),
            2 => Instruction::Jcc(Condition::from_bits(op)),
            4 => Instruction::Ccc(Condition::from_bits(op)),
            5 => Instruction::Push(RegPair::with_psw(op)),
            6 => Instruction::AluImm(AluOp::from_bits(op)),
            _ => Instruction::Rst((op >> 3) & 0x07),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_decode_like_canonical_opcodes() {
        for op in [0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38] {
            assert_eq!(DECODE[op], DECODE[0x00]);
        }
        assert_eq!(DECODE[0xcb], DECODE[0xc3]);
        assert_eq!(DECODE[0xd9], DECODE[0xc9]);
        for op in [0xdd, 0xed, 0xfd] {
            assert_eq!(DECODE[op], DECODE[0xcd]);
        }
    }

    #[test]
    fn register_fields_decode() {
        assert_eq!(
            DECODE[0x7e],
            Instruction::Mov {
                dst: Operand::A,
                src: Operand::M
            }
        );
        assert_eq!(
            DECODE[0x70],
            Instruction::Mov {
                dst: Operand::M,
                src: Operand::B
            }
        );
        assert_eq!(DECODE[0x76], Instruction::Hlt);
        assert_eq!(DECODE[0x34], Instruction::Inr(Operand::M));
        assert_eq!(DECODE[0x3d], Instruction::Dcr(Operand::A));
        assert_eq!(DECODE[0x36], Instruction::Mvi(Operand::M));
        assert_eq!(
            DECODE[0xbe],
            Instruction::Alu {
                op: AluOp::Cmp,
                src: Operand::M
            }
        );
        assert_eq!(DECODE[0xe6], Instruction::AluImm(AluOp::Ana));
    }

    #[test]
    fn register_pairs_distinguish_sp_and_psw() {
        assert_eq!(DECODE[0x31], Instruction::Lxi(RegPair::SP));
        assert_eq!(DECODE[0x39], Instruction::Dad(RegPair::SP));
        assert_eq!(DECODE[0xf5], Instruction::Push(RegPair::PSW));
        assert_eq!(DECODE[0xf1], Instruction::Pop(RegPair::PSW));
        assert_eq!(DECODE[0xd5], Instruction::Push(RegPair::DE));
    }

    #[test]
    fn condition_field_order() {
        let expected = [
            Condition::NotZero,
            Condition::Zero,
            Condition::NoCarry,
            Condition::Carry,
            Condition::ParityOdd,
            Condition::ParityEven,
            Condition::Plus,
            Condition::Minus,
        ];
        for (i, cond) in expected.into_iter().enumerate() {
            let base = 0xc0 | (i << 3);
            assert_eq!(DECODE[base], Instruction::Rcc(cond));
            assert_eq!(DECODE[base | 2], Instruction::Jcc(cond));
            assert_eq!(DECODE[base | 4], Instruction::Ccc(cond));
            assert_eq!(DECODE[base | 7], Instruction::Rst(i as u8));
        }
    }
}
