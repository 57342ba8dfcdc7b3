//! `CN3D` volume file codec.
//!
//! # Binary Layout
//!
//! All integers are **little-endian**.
//!
//! ```text
//! Offset  Size    Field
//!      0     4    magic = b"CN3D"
//!      4     4    size  (u32 LE, side length)
//!      8  size³   voxels, z-major, then y, then x
//! ```
//!
//! A size-4 volume is therefore exactly 72 bytes. Readers reject any file
//! whose payload is not exactly `size³` bytes; nothing is truncated or padded.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use thiserror::Error;

use super::VoxelVolume;

/// Magic bytes at offset 0 of every volume file.
pub const CN3D_MAGIC: &[u8; 4] = b"CN3D";

/// Size of the magic plus the side length.
pub const HEADER_SIZE: usize = 8;

/// Structural problems in a volume file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorruptVolumeFile {
    /// The first four bytes are not `CN3D`.
    #[error("bad magic {0:?}, expected \"CN3D\"")]
    BadMagic([u8; 4]),
    /// The file ends before the 8-byte header does.
    #[error("file is shorter than the {HEADER_SIZE}-byte header")]
    TruncatedHeader,
    /// The payload is not `size³` bytes long.
    #[error("expected {expected} voxel bytes, found {actual}")]
    LengthMismatch {
        /// `size³`.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
    /// `size³` does not fit in memory on this platform.
    #[error("volume size {size} is too large")]
    SizeOverflow {
        /// Declared side length.
        size: u64,
    },
}

/// Errors raised while reading or writing a volume file.
#[derive(Debug, Error)]
pub enum VolumeFileError {
    /// The bytes do not form a valid volume.
    #[error("corrupt volume file: {0}")]
    Corrupt(#[from] CorruptVolumeFile),
    /// The underlying reader or writer failed.
    #[error("volume file I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl VoxelVolume {
    /// Writes the volume in `CN3D` layout.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), VolumeFileError> {
        let size = u32::try_from(self.size).map_err(|_| CorruptVolumeFile::SizeOverflow {
            size: self.size as u64,
        })?;
        writer.write_all(CN3D_MAGIC)?;
        writer.write_all(&size.to_le_bytes())?;
        writer.write_all(&self.voxels)?;
        writer.flush()?;
        Ok(())
    }

    /// Encodes the volume into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, VolumeFileError> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.voxels.len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Writes the volume to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), VolumeFileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))?;
        log::info!(
            "Saved cloud volume to {} ({:.2} MiB)",
            path.display(),
            (HEADER_SIZE + self.voxels.len()) as f64 / (1024.0 * 1024.0)
        );
        Ok(())
    }

    /// Reads a `CN3D` volume, consuming `reader` to the end.
    pub fn read_from(mut reader: impl Read) -> Result<Self, VolumeFileError> {
        let mut header = [0u8; HEADER_SIZE];
        match reader.read_exact(&mut header) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(CorruptVolumeFile::TruncatedHeader.into());
            }
            Err(err) => return Err(err.into()),
        }

        let (magic, size) = header.split_at(4);
        let mut magic_bytes = [0u8; 4];
        magic_bytes.copy_from_slice(magic);
        if &magic_bytes != CN3D_MAGIC {
            return Err(CorruptVolumeFile::BadMagic(magic_bytes).into());
        }

        let mut size_bytes = [0u8; 4];
        size_bytes.copy_from_slice(size);
        let size = u32::from_le_bytes(size_bytes);
        let side = usize::try_from(size).map_err(|_| CorruptVolumeFile::SizeOverflow {
            size: u64::from(size),
        })?;
        let expected = side
            .checked_mul(side)
            .and_then(|square| square.checked_mul(side))
            .ok_or(CorruptVolumeFile::SizeOverflow {
                size: u64::from(size),
            })?;

        // Read one byte past the payload so trailing garbage is detected
        // without buffering an arbitrarily long tail.
        let mut voxels = Vec::new();
        reader
            .by_ref()
            .take(expected as u64 + 1)
            .read_to_end(&mut voxels)?;
        if voxels.len() != expected {
            let actual = if voxels.len() > expected {
                voxels.len() + drain_len(&mut reader)?
            } else {
                voxels.len()
            };
            return Err(CorruptVolumeFile::LengthMismatch { expected, actual }.into());
        }

        Ok(Self { size: side, voxels })
    }

    /// Decodes a `CN3D` byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VolumeFileError> {
        Self::read_from(bytes)
    }

    /// Reads a `CN3D` file from `path`.
    pub fn load(path: &Path) -> Result<Self, VolumeFileError> {
        let file = fs::File::open(path)?;
        Self::read_from(io::BufReader::new(file))
    }
}

/// Counts and discards the rest of `reader`.
fn drain_len(reader: &mut impl Read) -> io::Result<usize> {
    let drained = io::copy(reader, &mut io::sink())?;
    Ok(usize::try_from(drained).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(size: usize) -> VoxelVolume {
        let voxels = (0..size * size * size).map(|i| (i % 251) as u8).collect();
        VoxelVolume::from_voxels(size, voxels).expect("length is size³")
    }

    #[test]
    fn test_layout() {
        let bytes = volume(4).to_bytes().expect("encodes");
        assert_eq!(bytes.len(), 72);
        assert_eq!(&bytes[..4], b"CN3D");
        assert_eq!(&bytes[4..8], &[4, 0, 0, 0]);
        assert_eq!(bytes[8], 0);
        assert_eq!(bytes[9], 1);
    }

    #[test]
    fn test_round_trip() {
        let original = volume(128);
        let bytes = original.to_bytes().expect("encodes");
        let decoded = VoxelVolume::from_bytes(&bytes).expect("decodes");
        assert_eq!(decoded, original);
        assert_eq!(decoded.to_bytes().expect("encodes"), bytes);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = volume(2).to_bytes().expect("encodes");
        bytes[..4].copy_from_slice(b"CN2D");
        assert!(matches!(
            VoxelVolume::from_bytes(&bytes),
            Err(VolumeFileError::Corrupt(CorruptVolumeFile::BadMagic(m))) if &m == b"CN2D"
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            VoxelVolume::from_bytes(b"CN3D\x04\x00"),
            Err(VolumeFileError::Corrupt(CorruptVolumeFile::TruncatedHeader))
        ));
        assert!(matches!(
            VoxelVolume::from_bytes(&[]),
            Err(VolumeFileError::Corrupt(CorruptVolumeFile::TruncatedHeader))
        ));
    }

    #[test]
    fn test_short_payload() {
        let mut bytes = volume(4).to_bytes().expect("encodes");
        bytes.pop();
        assert!(matches!(
            VoxelVolume::from_bytes(&bytes),
            Err(VolumeFileError::Corrupt(CorruptVolumeFile::LengthMismatch {
                expected: 64,
                actual: 63
            }))
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = volume(4).to_bytes().expect("encodes");
        bytes.extend_from_slice(&[1, 2, 3]);
        assert!(matches!(
            VoxelVolume::from_bytes(&bytes),
            Err(VolumeFileError::Corrupt(CorruptVolumeFile::LengthMismatch {
                expected: 64,
                actual: 67
            }))
        ));
    }

    #[test]
    fn test_empty_volume() {
        let bytes = volume(0).to_bytes().expect("encodes");
        assert_eq!(bytes, b"CN3D\x00\x00\x00\x00");
        assert_eq!(VoxelVolume::from_bytes(&bytes).expect("decodes").size(), 0);
    }
}
