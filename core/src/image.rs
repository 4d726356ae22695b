//! Block image serialization.
//!
//! A block image is the raw binary form of the core: each cell is two
//! bytes, little-endian, low byte first. The assembler saves only the
//! compiled length; the loader accepts anything up to a full core and
//! zero-fills the rest.

use std::fs;
use std::io;
use std::path::Path;

use crate::vm::CORE_CELLS;

/// Conventional block image path used by the driver.
pub const FORTH_BLOCK: &str = "ferrite.blk";

/// Serialize cells into little-endian bytes.
pub fn encode(cells: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(cells.len() * 2);
    for &cell in cells {
        bytes.push(cell as u8);
        bytes.push((cell >> 8) as u8);
    }
    bytes
}

/// Deserialize little-endian bytes into cells. Odd-length and oversize
/// input is rejected.
pub fn decode(bytes: &[u8]) -> io::Result<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "odd-length block image",
        ));
    }
    if bytes.len() > CORE_CELLS * 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("block image over {} bytes", CORE_CELLS * 2),
        ));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| pair[0] as u16 | ((pair[1] as u16) << 8))
        .collect())
}

/// Read a block image from disk.
pub fn read(path: &Path) -> io::Result<Vec<u16>> {
    decode(&fs::read(path)?)
}

/// Write a block image to disk.
pub fn write(path: &Path, cells: &[u16]) -> io::Result<()> {
    fs::write(path, encode(cells))
}
