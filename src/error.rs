//! Error types for CertChain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    DuplicateCertificate(String),
    CertificateNotFound(String),
    OwnershipMismatch { expected: String, claimed: String },
    InvalidTransfer(String),
    InvalidMint(String),
    ChainCorrupted { index: u64, reason: String },
    StorageUnavailable(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::DuplicateCertificate(fp) => {
                write!(f, "Certificate already registered: {}", fp)
            }
            ChainError::CertificateNotFound(fp) => {
                write!(f, "No record found for certificate: {}", fp)
            }
            ChainError::OwnershipMismatch { expected, claimed } => write!(
                f,
                "Ownership mismatch: current holder is {}, not {}",
                expected, claimed
            ),
            ChainError::InvalidTransfer(msg) => write!(f, "Invalid transfer: {}", msg),
            ChainError::InvalidMint(msg) => write!(f, "Invalid mint: {}", msg),
            ChainError::ChainCorrupted { index, reason } => {
                write!(f, "Chain corrupted at block {}: {}", index, reason)
            }
            ChainError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::StorageUnavailable(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
