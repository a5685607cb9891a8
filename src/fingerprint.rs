//! Certificate fingerprinting for CertChain
//!
//! A certificate fingerprint is the hex-encoded SHA-256 of the certificate
//! file digest joined with its identifying metadata:
//!
//! ```text
//! sha256( file_hash | student | course | year )
//! ```
//!
//! The same file and metadata always produce the same fingerprint, so the
//! fingerprint doubles as the lookup key for every later query.

use crate::error::ChainError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Hex length of a SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash arbitrary bytes and return lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compute the SHA-256 digest of a certificate file, streaming in 8 KiB
/// chunks so large scans do not need to fit in memory.
pub fn file_digest(path: &Path) -> Result<String, ChainError> {
    let mut file = File::open(path).map_err(|e| {
        ChainError::InvalidMint(format!(
            "Cannot read certificate file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| {
            ChainError::InvalidMint(format!(
                "Cannot read certificate file {}: {}",
                path.display(),
                e
            ))
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Combine a file digest with the certificate metadata into the
/// deterministic fingerprint used as the ledger key.
pub fn certificate_fingerprint(file_hash: &str, student: &str, course: &str, year: &str) -> String {
    sha256_hex(format!("{}|{}|{}|{}", file_hash, student, course, year).as_bytes())
}
