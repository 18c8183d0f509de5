//! Video RAM decoding.
//!
//! The monitor is mounted rotated, so the 256x224 raster held in video RAM is
//! shown as a 224x256 portrait image. Each byte holds 8 vertically adjacent
//! pixels of one screen column, bit 0 lowest; 32 bytes make up a column and
//! columns run left to right.

use arcade8080_common::Color;

use crate::memory::VRAM_SIZE;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// How lit pixels are coloured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    /// Every lit pixel is white.
    #[default]
    Monochrome,
    /// Emulate the coloured gel strips of the cabinet: a red band near the
    /// top and a green band over the bottom of the screen.
    Overlay,
}

impl Palette {
    /// Colour of a lit pixel at raster row `row` (0 = bottom of the screen).
    fn lit(self, row: usize) -> Color {
        match self {
            Palette::Monochrome => Color::WHITE,
            Palette::Overlay => {
                if row > 200 && row < 220 {
                    Color::RED
                } else if row < 80 {
                    Color::GREEN
                } else {
                    Color::WHITE
                }
            }
        }
    }
}

/// Screen position of bit `bit` of video RAM byte `index`, as `(x, y)` with
/// the origin at the top left.
#[inline]
pub fn pixel_position(index: usize, bit: u8) -> (usize, usize) {
    let x = index * 8 / SCREEN_HEIGHT;
    let row = (index * 8) % SCREEN_HEIGHT + bit as usize;
    (x, SCREEN_HEIGHT - 1 - row)
}

/// Decode `vram` into an RGB24 image of `SCREEN_WIDTH * SCREEN_HEIGHT` pixels.
pub fn decode_frame(vram: &[u8], palette: Palette, screen: &mut [u8]) {
    debug_assert_eq!(vram.len(), VRAM_SIZE);
    debug_assert_eq!(screen.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);

    for (i, &byte) in vram.iter().enumerate() {
        let row_base = (i * 8) % SCREEN_HEIGHT;
        for bit in 0..8u8 {
            let (x, y) = pixel_position(i, bit);
            let color = if byte & (1 << bit) != 0 {
                palette.lit(row_base + bit as usize)
            } else {
                Color::BLACK
            };
            color.write_rgb24(screen, y * SCREEN_WIDTH + x);
        }
    }
}

/// 64-bit FNV-1a digest of a video RAM snapshot.
///
/// Stable across runs and platforms, so it serves as a golden value for
/// regression traces.
pub fn frame_checksum(vram: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    vram.iter().fold(OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(screen: &[u8], x: usize, y: usize) -> (u8, u8, u8) {
        let i = (y * SCREEN_WIDTH + x) * 3;
        (screen[i], screen[i + 1], screen[i + 2])
    }

    #[test]
    fn first_byte_lands_bottom_left() {
        let mut vram = vec![0u8; VRAM_SIZE];
        vram[0] = 0x01;
        let mut screen = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
        decode_frame(&vram, Palette::Monochrome, &mut screen);

        assert_eq!(pixel(&screen, 0, 255), (255, 255, 255));
        assert_eq!(pixel(&screen, 0, 254), (0, 0, 0));
        let lit = screen.chunks(3).filter(|p| p[0] != 0).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn positions_follow_rotated_layout() {
        // Bit 7 of byte 0 sits 7 rows above bit 0.
        assert_eq!(pixel_position(0, 7), (0, 248));
        // Byte 31 is the top of column 0.
        assert_eq!(pixel_position(31, 7), (0, 0));
        // Byte 32 starts column 1 at the bottom.
        assert_eq!(pixel_position(32, 0), (1, 255));
        // Last byte is the top of the rightmost column.
        assert_eq!(pixel_position(VRAM_SIZE - 1, 7), (SCREEN_WIDTH - 1, 0));
    }

    #[test]
    fn overlay_tints_bottom_band_green() {
        let mut vram = vec![0u8; VRAM_SIZE];
        vram[0] = 0x01;
        vram[31] = 0x80;
        let mut screen = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
        decode_frame(&vram, Palette::Overlay, &mut screen);
        assert_eq!(pixel(&screen, 0, 255), (0, 255, 0));
        assert_eq!(pixel(&screen, 0, 0), (255, 255, 255));
    }

    #[test]
    fn checksum_is_order_sensitive() {
        let a = frame_checksum(&[1, 2, 3]);
        let b = frame_checksum(&[3, 2, 1]);
        assert_ne!(a, b);
        assert_eq!(a, frame_checksum(&[1, 2, 3]));
        assert_eq!(frame_checksum(&[]), 0xcbf2_9ce4_8422_2325);
    }
}
