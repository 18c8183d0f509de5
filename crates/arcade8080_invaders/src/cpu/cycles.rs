/// Clock states taken by each opcode.
///
/// The cost is fixed per opcode: conditional CALLs are charged as taken (17)
/// and conditional RETs as not taken (5). Undocumented aliases cost the same
/// as the instruction they alias.
#[rustfmt::skip]
pub const CYCLES: [u8; 256] = [
    //  0   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
         4, 10,  7,  5,  5,  5,  7,  4,  4, 10,  7,  5,  5,  5,  7,  4, // 0x00
         4, 10,  7,  5,  5,  5,  7,  4,  4, 10,  7,  5,  5,  5,  7,  4, // 0x10
         4, 10, 16,  5,  5,  5,  7,  4,  4, 10, 16,  5,  5,  5,  7,  4, // 0x20
         4, 10, 13,  5, 10, 10, 10,  4,  4, 10, 13,  5,  5,  5,  7,  4, // 0x30
         5,  5,  5,  5,  5,  5,  7,  5,  5,  5,  5,  5,  5,  5,  7,  5, // 0x40
         5,  5,  5,  5,  5,  5,  7,  5,  5,  5,  5,  5,  5,  5,  7,  5, // 0x50
         5,  5,  5,  5,  5,  5,  7,  5,  5,  5,  5,  5,  5,  5,  7,  5, // 0x60
         7,  7,  7,  7,  7,  7,  7,  7,  5,  5,  5,  5,  5,  5,  7,  5, // 0x70
         4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0x80
         4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0x90
         4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0xA0
         4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0xB0
         5, 10, 10, 10, 17, 11,  7, 11,  5, 10, 10, 10, 17, 17,  7, 11, // 0xC0
         5, 10, 10, 10, 17, 11,  7, 11,  5, 10, 10, 10, 17, 17,  7, 11, // 0xD0
         5, 10, 10, 18, 17, 11,  7, 11,  5,  5, 10,  4, 17, 17,  7, 11, // 0xE0
         5, 10, 10,  4, 17, 11,  7, 11,  5,  5, 10,  4, 17, 17,  7, 11, // 0xF0
];
