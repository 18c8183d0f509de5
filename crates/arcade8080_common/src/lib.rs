pub mod app;
pub mod key;

pub use app::App;
pub use key::Key;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);
    pub const RED: Color = Color::new_rgb(255, 0, 0);
    pub const GREEN: Color = Color::new_rgb(0, 255, 0);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Write this colour into an RGB24 buffer at pixel offset `idx * 3`.
    #[inline]
    pub fn write_rgb24(&self, buffer: &mut [u8], idx: usize) {
        let base = idx * 3;
        buffer[base] = self.r;
        buffer[base + 1] = self.g;
        buffer[base + 2] = self.b;
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn write_rgb24_places_channels_in_order() {
        let mut buf = [0u8; 6];
        Color::new_rgb(1, 2, 3).write_rgb24(&mut buf, 1);
        assert_eq!(buf, [0, 0, 0, 1, 2, 3]);
    }
}
