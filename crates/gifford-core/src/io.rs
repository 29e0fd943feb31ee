//! Whole-file byte buffer I/O.
//!
//! The engine only ever sees opaque byte buffers; these helpers read an
//! entire file into memory and write a transformed buffer back out. I/O
//! failure is the sole abort condition of the whole pipeline, surfaced as
//! `std::io::Error` for the caller to report.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Read a whole file into a byte buffer.
pub fn read_bytes(path: &Path) -> io::Result<Vec<u8>> {
    let data = fs::read(path)?;
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Write a byte buffer to a file, replacing any existing content.
pub fn write_bytes(path: &Path, data: &[u8]) -> io::Result<()> {
    fs::write(path, data)?;
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
