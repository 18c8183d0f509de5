use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::memory::Memory;

/// Size of each of the four program ROM chips.
pub const ROM_IMAGE_SIZE: usize = 0x0800;

/// File name and load address of each chip, in address order.
pub const ROM_LAYOUT: [(&str, u16); 4] = [
    ("invaders.h", 0x0000),
    ("invaders.g", 0x0800),
    ("invaders.f", 0x1000),
    ("invaders.e", 0x1800),
];

/// Size of a single file holding all four chips back to back.
pub const COMBINED_ROM_SIZE: usize = ROM_IMAGE_SIZE * ROM_LAYOUT.len();

/// Errors raised while assembling or installing the program ROMs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM image {name} not found at {path}")]
    Missing {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ROM image {name} has the wrong size: expected {expected} bytes, got {actual}")]
    WrongSize {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("ROM image {name} does not fit at {base:#06x} ({len} bytes)")]
    OutOfRange { name: String, base: u16, len: usize },
}

/// The four program ROM images, each verified to be exactly 2 KiB.
///
/// A `RomSet` can only be built complete, so a machine constructed from one
/// never starts partially loaded.
#[derive(Clone)]
pub struct RomSet {
    images: [Vec<u8>; 4],
}

impl std::fmt::Debug for RomSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = ROM_LAYOUT.iter().map(|(name, _)| *name).collect();
        f.debug_struct("RomSet").field("images", &names).finish()
    }
}

impl RomSet {
    /// Read `invaders.h`, `.g`, `.f` and `.e` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let mut images: [Vec<u8>; 4] = Default::default();
        for (slot, (name, _)) in images.iter_mut().zip(ROM_LAYOUT) {
            let path = dir.join(name);
            let data = std::fs::read(&path).map_err(|source| LoadError::Missing {
                name: name.to_string(),
                path: path.clone(),
                source,
            })?;
            check_size(name, &data, ROM_IMAGE_SIZE)?;
            log::debug!("Read ROM image {} ({} bytes)", path.display(), data.len());
            *slot = data;
        }
        Ok(Self { images })
    }

    /// Split a single 8 KiB dump (h, g, f, e concatenated) into the four chips.
    pub fn from_combined(rom: &[u8]) -> Result<Self, LoadError> {
        check_size("combined image", rom, COMBINED_ROM_SIZE)?;
        let mut images: [Vec<u8>; 4] = Default::default();
        for (slot, chunk) in images.iter_mut().zip(rom.chunks_exact(ROM_IMAGE_SIZE)) {
            *slot = chunk.to_vec();
        }
        Ok(Self { images })
    }

    /// Build from in-memory images given in `ROM_LAYOUT` order.
    pub fn from_images(images: [Vec<u8>; 4]) -> Result<Self, LoadError> {
        for (data, (name, _)) in images.iter().zip(ROM_LAYOUT) {
            check_size(name, data, ROM_IMAGE_SIZE)?;
        }
        Ok(Self { images })
    }

    /// Load `path` as a directory of chips or as a combined dump.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::from_dir(path);
        }
        let data = std::fs::read(path).map_err(|source| LoadError::Missing {
            name: path.display().to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_combined(&data)
    }

    /// Copy every chip to its load address.
    pub fn install(&self, memory: &mut Memory) -> Result<(), LoadError> {
        for (data, (name, base)) in self.images.iter().zip(ROM_LAYOUT) {
            memory.load_image(name, base, data, ROM_IMAGE_SIZE)?;
        }
        Ok(())
    }
}

fn check_size(name: &str, data: &[u8], expected: usize) -> Result<(), LoadError> {
    if data.len() != expected {
        return Err(LoadError::WrongSize {
            name: name.to_string(),
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chips() -> [Vec<u8>; 4] {
        [
            vec![0x11; ROM_IMAGE_SIZE],
            vec![0x22; ROM_IMAGE_SIZE],
            vec![0x33; ROM_IMAGE_SIZE],
            vec![0x44; ROM_IMAGE_SIZE],
        ]
    }

    #[test]
    fn install_places_chips_at_their_bases() {
        let roms = RomSet::from_images(chips()).unwrap();
        let mut mem = Memory::new();
        roms.install(&mut mem).unwrap();
        assert_eq!(mem.read(0x0000), 0x11);
        assert_eq!(mem.read(0x07ff), 0x11);
        assert_eq!(mem.read(0x0800), 0x22);
        assert_eq!(mem.read(0x1000), 0x33);
        assert_eq!(mem.read(0x1fff), 0x44);
        assert_eq!(mem.read(0x2000), 0x00);
    }

    #[test]
    fn short_chip_is_named_in_error() {
        let mut images = chips();
        images[2].truncate(2000);
        let err = RomSet::from_images(images).unwrap_err();
        match err {
            LoadError::WrongSize {
                name,
                expected,
                actual,
            } => {
                assert_eq!(name, "invaders.f");
                assert_eq!(expected, ROM_IMAGE_SIZE);
                assert_eq!(actual, 2000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn combined_image_splits_in_order() {
        let combined: Vec<u8> = chips().concat();
        let roms = RomSet::from_combined(&combined).unwrap();
        let mut mem = Memory::new();
        roms.install(&mut mem).unwrap();
        assert_eq!(mem.read(0x0123), 0x11);
        assert_eq!(mem.read(0x0923), 0x22);
        assert_eq!(mem.read(0x1123), 0x33);
        assert_eq!(mem.read(0x1923), 0x44);
    }

    #[test]
    fn combined_image_must_be_exact() {
        let err = RomSet::from_combined(&[0u8; COMBINED_ROM_SIZE - 1]).unwrap_err();
        assert!(matches!(err, LoadError::WrongSize { .. }));
    }

    #[test]
    fn missing_file_is_named_in_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("invaders.h"), vec![0u8; ROM_IMAGE_SIZE]).unwrap();

        let err = RomSet::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Missing { ref name, .. } if name == "invaders.g"));
        assert!(err.to_string().contains("invaders.g"));
    }

    #[test]
    fn directory_and_combined_file_load_alike() {
        let dir = tempfile::tempdir().unwrap();
        for (data, (name, _)) in chips().iter().zip(ROM_LAYOUT) {
            std::fs::write(dir.path().join(name), data).unwrap();
        }
        let combined = dir.path().join("invaders.rom");
        std::fs::write(&combined, chips().concat()).unwrap();

        let mut from_dir = Memory::new();
        RomSet::from_path(dir.path()).unwrap().install(&mut from_dir).unwrap();
        let mut from_file = Memory::new();
        RomSet::from_path(&combined).unwrap().install(&mut from_file).unwrap();

        assert_eq!(from_dir.read(0x0000), 0x11);
        assert_eq!(from_dir.read(0x1fff), 0x44);
        for addr in [0x0000u16, 0x0800, 0x1000, 0x1800, 0x1fff] {
            assert_eq!(from_dir.read(addr), from_file.read(addr));
        }
    }

    #[test]
    fn short_file_on_disk_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for (i, (name, _)) in ROM_LAYOUT.iter().enumerate() {
            let len = if i == 3 { ROM_IMAGE_SIZE - 1 } else { ROM_IMAGE_SIZE };
            std::fs::write(dir.path().join(name), vec![0u8; len]).unwrap();
        }
        let err = RomSet::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::WrongSize { ref name, .. } if name == "invaders.e"));
    }
}
