//! Content checksums
//!
//! Immich records the SHA-1 of every original file. The file is streamed
//! through the hasher in fixed-size chunks, so memory use does not grow with
//! file size.

use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// Compute the SHA-1 digest of a file
pub fn sha1_file(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    sha1_reader(file)
}

/// Compute the SHA-1 digest of everything a reader yields
pub fn sha1_reader(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_vec())
}

/// Hex rendering of a checksum, for log lines
pub fn to_hex(checksum: &[u8]) -> String {
    hex::encode(checksum)
}
