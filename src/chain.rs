//! The certificate chain: append, validation and query logic
//!
//! `Chain` owns the ordered block sequence and the durable store. Appends go
//! through [`Chain::mint`] and [`Chain::transfer`] only; both take `&mut
//! self`, so the read-tail/build-block/write step is a critical section by
//! construction. Callers that share a chain across threads wrap it in a
//! `Mutex`.

pub mod query;
pub mod validation;

use crate::block::{Block, Event, GENESIS_DIGEST};
use crate::clock::{Clock, SystemClock};
use crate::error::{ChainError, Result};
use crate::fingerprint::certificate_fingerprint;
use crate::store::LedgerStore;

pub use query::CertificateView;
pub use validation::validate_chain;

pub struct Chain {
    blocks: Vec<Block>,
    store: Box<dyn LedgerStore>,
    clock: Box<dyn Clock>,
}

impl Chain {
    /// Create an empty chain backed by the given store.
    pub fn new(store: Box<dyn LedgerStore>) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Create an empty chain with an explicit time source.
    pub fn with_clock(store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> Self {
        Chain {
            blocks: Vec::new(),
            store,
            clock,
        }
    }

    /// Load the block sequence from the store and validate it before
    /// trusting it. An absent store yields an empty chain; a corrupted one
    /// is reported, never repaired.
    pub fn load(store: Box<dyn LedgerStore>) -> Result<Self> {
        Self::load_with_clock(store, Box::new(SystemClock))
    }

    pub fn load_with_clock(store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> Result<Self> {
        let blocks = store.load()?;
        validate_chain(&blocks)?;
        log::info!("Loaded certificate chain with {} block(s)", blocks.len());
        Ok(Chain {
            blocks,
            store,
            clock,
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn tail_digest(&self) -> String {
        self.blocks
            .last()
            .map(|b| b.digest.clone())
            .unwrap_or_else(|| GENESIS_DIGEST.to_string())
    }

    /// Register a certificate and return its fingerprint.
    ///
    /// The fingerprint is derived from the file digest plus the metadata, so
    /// registering the same document for the same student twice fails with
    /// `DuplicateCertificate`.
    pub fn mint(
        &mut self,
        file_hash: &str,
        student: &str,
        course: &str,
        year: &str,
        owner: &str,
    ) -> Result<String> {
        for (name, value) in [
            ("file hash", file_hash),
            ("student name", student),
            ("course", course),
            ("year", year),
            ("owner", owner),
        ] {
            if value.trim().is_empty() {
                return Err(ChainError::InvalidMint(format!("{} must not be empty", name)));
            }
        }

        let fingerprint = certificate_fingerprint(file_hash, student, course, year);
        if self.has_mint(&fingerprint) {
            return Err(ChainError::DuplicateCertificate(fingerprint));
        }

        self.append(Event::Mint {
            fingerprint: fingerprint.clone(),
            file_hash: file_hash.to_string(),
            student: student.to_string(),
            course: course.to_string(),
            year: year.to_string(),
            owner: owner.to_string(),
        })?;

        log::info!("Minted certificate {}", fingerprint);
        Ok(fingerprint)
    }

    /// Record a change of holder for an already-registered certificate.
    pub fn transfer(&mut self, fingerprint: &str, from_owner: &str, to_owner: &str) -> Result<()> {
        let current = query::current_owner(&self.blocks, fingerprint)?;
        if current != from_owner {
            return Err(ChainError::OwnershipMismatch {
                expected: current,
                claimed: from_owner.to_string(),
            });
        }
        if to_owner.trim().is_empty() {
            return Err(ChainError::InvalidTransfer(
                "new owner must not be empty".to_string(),
            ));
        }
        if to_owner == from_owner {
            return Err(ChainError::InvalidTransfer(
                "new owner must differ from current owner".to_string(),
            ));
        }

        self.append(Event::Transfer {
            fingerprint: fingerprint.to_string(),
            from_owner: from_owner.to_string(),
            to_owner: to_owner.to_string(),
        })?;

        log::info!(
            "Transferred certificate {} from {} to {}",
            fingerprint,
            from_owner,
            to_owner
        );
        Ok(())
    }

    /// Ordered event history for a certificate.
    pub fn history(&self, fingerprint: &str) -> Result<Vec<Block>> {
        query::history(&self.blocks, fingerprint)
    }

    /// Current holder of a certificate, derived by replay.
    pub fn current_owner(&self, fingerprint: &str) -> Result<String> {
        query::current_owner(&self.blocks, fingerprint)
    }

    /// History and current holder bundled for presentation.
    pub fn view(&self, fingerprint: &str) -> Result<CertificateView> {
        query::view(&self.blocks, fingerprint)
    }

    /// Walk the whole chain and verify every integrity invariant.
    pub fn validate(&self) -> Result<()> {
        validate_chain(&self.blocks)
    }

    fn has_mint(&self, fingerprint: &str) -> bool {
        self.blocks
            .iter()
            .any(|b| b.event.is_mint() && b.event.fingerprint() == fingerprint)
    }

    /// Append one event and persist the full sequence.
    ///
    /// If the save fails the block stays in memory, so the caller can retry
    /// the save without losing the append; the previously durable state is
    /// untouched because the store commits atomically.
    fn append(&mut self, event: Event) -> Result<()> {
        let block = Block::new(
            self.blocks.len() as u64,
            self.clock.now().to_rfc3339(),
            self.tail_digest(),
            event,
        );
        log::debug!("Appending block #{} ({})", block.index, block.event.kind());
        self.blocks.push(block);
        self.store.save(&self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn test_chain() -> Chain {
        Chain::new(Box::new(InMemoryStore::new()))
    }

    fn mint_john(chain: &mut Chain) -> String {
        chain
            .mint("filehash01", "John Doe", "Physics", "2025", "John Doe")
            .unwrap()
    }

    #[test]
    fn mint_returns_fingerprint_and_appends_block() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);

        assert_eq!(chain.len(), 1);
        assert_eq!(fp.len(), 64);
        assert_eq!(chain.blocks()[0].previous_digest, GENESIS_DIGEST);
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn duplicate_mint_is_rejected() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);

        let err = chain
            .mint("filehash01", "John Doe", "Physics", "2025", "John Doe")
            .unwrap_err();
        assert_eq!(err, ChainError::DuplicateCertificate(fp));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn mint_rejects_empty_metadata() {
        let mut chain = test_chain();
        let err = chain
            .mint("filehash01", "  ", "Physics", "2025", "John Doe")
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidMint(_)));
        assert!(chain.is_empty());
    }

    #[test]
    fn transfer_updates_current_owner() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);

        chain.transfer(&fp, "John Doe", "University Admin").unwrap();

        assert_eq!(chain.current_owner(&fp).unwrap(), "University Admin");
        let history = chain.history(&fp).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].event.kind(), "mint");
        assert_eq!(history[1].event.kind(), "transfer");
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn transfer_unknown_certificate_fails() {
        let mut chain = test_chain();
        let err = chain.transfer(&"a".repeat(64), "John Doe", "X").unwrap_err();
        assert!(matches!(err, ChainError::CertificateNotFound(_)));
    }

    #[test]
    fn transfer_from_wrong_owner_fails() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);
        chain.transfer(&fp, "John Doe", "University Admin").unwrap();

        let err = chain.transfer(&fp, "Someone Else", "X").unwrap_err();
        assert_eq!(
            err,
            ChainError::OwnershipMismatch {
                expected: "University Admin".to_string(),
                claimed: "Someone Else".to_string(),
            }
        );
    }

    #[test]
    fn self_transfer_and_empty_recipient_are_invalid() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);

        let err = chain.transfer(&fp, "John Doe", "John Doe").unwrap_err();
        assert!(matches!(err, ChainError::InvalidTransfer(_)));

        let err = chain.transfer(&fp, "John Doe", "").unwrap_err();
        assert!(matches!(err, ChainError::InvalidTransfer(_)));

        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn blocks_link_by_digest() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);
        chain.transfer(&fp, "John Doe", "University Admin").unwrap();

        let blocks = chain.blocks();
        assert_eq!(blocks[1].previous_digest, blocks[0].digest);
        assert_eq!(blocks[1].index, 1);
    }

    #[test]
    fn repeated_history_queries_are_identical() {
        let mut chain = test_chain();
        let fp = mint_john(&mut chain);
        chain.transfer(&fp, "John Doe", "University Admin").unwrap();

        let first = chain.history(&fp).unwrap();
        let second = chain.history(&fp).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_save_keeps_block_in_memory() {
        struct FailingStore;
        impl LedgerStore for FailingStore {
            fn load(&self) -> Result<Vec<Block>> {
                Ok(Vec::new())
            }
            fn save(&self, _blocks: &[Block]) -> Result<()> {
                Err(ChainError::StorageUnavailable("disk full".to_string()))
            }
        }

        let mut chain = Chain::new(Box::new(FailingStore));
        let err = chain
            .mint("filehash01", "John Doe", "Physics", "2025", "John Doe")
            .unwrap_err();

        assert!(matches!(err, ChainError::StorageUnavailable(_)));
        // The append survived; a retry of the save would persist it.
        assert_eq!(chain.len(), 1);
        assert!(chain.validate().is_ok());
    }
}
