//! Durable persistence for the certificate ledger
//!
//! The whole chain lives in one JSON document: an ordered array of block
//! records. Saves rewrite the document through a temp file + rename, so a
//! crash mid-save leaves either the old document or the new one, never a
//! truncated mix. Loading never validates; callers run the chain validation
//! walk before trusting loaded data.

use crate::block::Block;
use crate::error::{ChainError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Abstraction for ledger backends. Implementations must commit saves
/// atomically and reproduce the saved sequence exactly on load.
pub trait LedgerStore: Send + Sync {
    /// Load the full block sequence in written order. Absent storage yields
    /// an empty sequence, not an error.
    fn load(&self) -> Result<Vec<Block>>;

    /// Write the full sequence so that a subsequent `load` reproduces it.
    fn save(&self, blocks: &[Block]) -> Result<()>;
}

/// JSON-document store backed by a single file on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for FileStore {
    fn load(&self) -> Result<Vec<Block>> {
        if !self.path.exists() {
            log::debug!("No ledger at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            ChainError::StorageUnavailable(format!(
                "Failed to read ledger {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let blocks: Vec<Block> = serde_json::from_str(&raw).map_err(|e| {
            ChainError::StorageUnavailable(format!(
                "Failed to parse ledger {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(blocks)
    }

    fn save(&self, blocks: &[Block]) -> Result<()> {
        let json = serde_json::to_string_pretty(blocks)?;

        // Write-to-temp-then-rename keeps the previous document intact if
        // anything here fails.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            ChainError::StorageUnavailable(format!("Failed to create temp ledger file: {}", e))
        })?;
        tmp.write_all(json.as_bytes()).map_err(|e| {
            ChainError::StorageUnavailable(format!("Failed to write ledger: {}", e))
        })?;
        tmp.as_file().sync_all().map_err(|e| {
            ChainError::StorageUnavailable(format!("Failed to sync ledger: {}", e))
        })?;
        tmp.persist(&self.path).map_err(|e| {
            ChainError::StorageUnavailable(format!(
                "Failed to commit ledger {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

/// Simple in-memory store useful for tests and ephemeral runs.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    blocks: Arc<Mutex<Vec<Block>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Block>> {
        let blocks = self
            .blocks
            .lock()
            .map_err(|_| ChainError::StorageUnavailable("Mutex poisoned".to_string()))?;
        Ok(blocks.clone())
    }

    fn save(&self, blocks: &[Block]) -> Result<()> {
        let mut stored = self
            .blocks
            .lock()
            .map_err(|_| ChainError::StorageUnavailable("Mutex poisoned".to_string()))?;
        *stored = blocks.to_vec();
        Ok(())
    }
}
