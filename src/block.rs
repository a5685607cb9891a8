//! Block structure for the certificate ledger
//!
//! Each block records exactly one lifecycle event: the first registration of
//! a certificate (`mint`) or a change of holder (`transfer`). Blocks are
//! immutable once built; the chain only ever appends.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Previous-digest sentinel carried by the first block of the chain.
pub const GENESIS_DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// A ledger event. The `kind` tag distinguishes the two payloads on disk,
/// so a mint can never be read back with transfer fields or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    Mint {
        fingerprint: String,
        file_hash: String,
        student: String,
        course: String,
        year: String,
        owner: String,
    },
    Transfer {
        fingerprint: String,
        from_owner: String,
        to_owner: String,
    },
}

impl Event {
    /// The certificate fingerprint this event refers to.
    pub fn fingerprint(&self) -> &str {
        match self {
            Event::Mint { fingerprint, .. } => fingerprint,
            Event::Transfer { fingerprint, .. } => fingerprint,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::Mint { .. } => "mint",
            Event::Transfer { .. } => "transfer",
        }
    }

    pub fn is_mint(&self) -> bool {
        matches!(self, Event::Mint { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String,
    pub previous_digest: String,
    #[serde(flatten)]
    pub event: Event,
    pub digest: String,
}

impl Block {
    /// Build a block and seal it with its own digest.
    pub fn new(index: u64, timestamp: String, previous_digest: String, event: Event) -> Self {
        let mut block = Block {
            index,
            timestamp,
            previous_digest,
            event,
            digest: String::new(),
        };
        block.digest = block.compute_digest();
        block
    }

    /// Recompute this block's digest from its content.
    ///
    /// The preimage is the canonical field order, each field's UTF-8 bytes
    /// separated by `|`: index, timestamp, previous digest, event kind,
    /// fingerprint, then the remaining payload fields in declaration order.
    /// Verifiers must use the same order, so it is fixed here and nowhere
    /// else.
    pub fn compute_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(self.timestamp.as_bytes());
        hasher.update(b"|");
        hasher.update(self.previous_digest.as_bytes());
        hasher.update(b"|");
        hasher.update(self.event.kind().as_bytes());
        hasher.update(b"|");
        hasher.update(self.event.fingerprint().as_bytes());

        match &self.event {
            Event::Mint {
                file_hash,
                student,
                course,
                year,
                owner,
                ..
            } => {
                for field in [file_hash, student, course, year, owner] {
                    hasher.update(b"|");
                    hasher.update(field.as_bytes());
                }
            }
            Event::Transfer {
                from_owner,
                to_owner,
                ..
            } => {
                for field in [from_owner, to_owner] {
                    hasher.update(b"|");
                    hasher.update(field.as_bytes());
                }
            }
        }
        hex::encode(hasher.finalize())
    }
}
