use crate::rom::LoadError;

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Start of video RAM used by Space Invaders.
///
/// The original hardware maps the frame buffer at 0x2400–0x3fff.
pub const VRAM_START: usize = 0x2400;
/// Size of video RAM in bytes (0x1c00 = 7168 bytes = 224x256 bits).
pub const VRAM_SIZE: usize = 0x1c00;

/// Flat 64 KiB address space shared by ROM, work RAM and video RAM.
///
/// Writes into the ROM region are not blocked and persist like any other
/// write.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.bytes.len()).finish()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// Little-endian word at `addr`; the high byte wraps past 0xffff.
    #[inline]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    #[inline]
    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    /// Copy `bytes` to `base`, requiring exactly `expected` bytes.
    ///
    /// `name` identifies the image in the returned error.
    pub fn load_image(
        &mut self,
        name: &str,
        base: u16,
        bytes: &[u8],
        expected: usize,
    ) -> Result<(), LoadError> {
        if bytes.len() != expected {
            return Err(LoadError::WrongSize {
                name: name.to_string(),
                expected,
                actual: bytes.len(),
            });
        }
        let start = base as usize;
        let end = start + expected;
        if end > MEMORY_SIZE {
            return Err(LoadError::OutOfRange {
                name: name.to_string(),
                base,
                len: expected,
            });
        }
        self.bytes[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Raw view of the video RAM window (0x2400–0x3fff).
    pub fn video_ram(&self) -> &[u8] {
        &self.bytes[VRAM_START..VRAM_START + VRAM_SIZE]
    }
}
