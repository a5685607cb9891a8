//! Certificate index: derived views over the block sequence
//!
//! Nothing here is stored; every query replays the chain on demand, which is
//! cheap at registry scale and can never drift out of sync with the ledger.

use crate::block::{Block, Event};
use crate::error::{ChainError, Result};

/// History and current holder of one certificate, for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateView {
    pub fingerprint: String,
    pub history: Vec<Block>,
    pub current_owner: String,
}

/// Ordered sub-sequence of blocks referencing the fingerprint.
pub fn history(blocks: &[Block], fingerprint: &str) -> Result<Vec<Block>> {
    let matched: Vec<Block> = blocks
        .iter()
        .filter(|b| b.event.fingerprint() == fingerprint)
        .cloned()
        .collect();

    if matched.is_empty() {
        return Err(ChainError::CertificateNotFound(fingerprint.to_string()));
    }
    Ok(matched)
}

/// Current holder, derived by replaying the certificate's events in order.
pub fn current_owner(blocks: &[Block], fingerprint: &str) -> Result<String> {
    let mut holder: Option<&str> = None;
    for block in blocks {
        if block.event.fingerprint() != fingerprint {
            continue;
        }
        holder = Some(match &block.event {
            Event::Mint { owner, .. } => owner,
            Event::Transfer { to_owner, .. } => to_owner,
        });
    }
    holder
        .map(|h| h.to_string())
        .ok_or_else(|| ChainError::CertificateNotFound(fingerprint.to_string()))
}

pub fn view(blocks: &[Block], fingerprint: &str) -> Result<CertificateView> {
    Ok(CertificateView {
        fingerprint: fingerprint.to_string(),
        history: history(blocks, fingerprint)?,
        current_owner: current_owner(blocks, fingerprint)?,
    })
}
