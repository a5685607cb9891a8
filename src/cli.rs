//! Shared helpers for the CertChain binaries

use crate::block::{Block, Event};
use crate::chain::Chain;
use crate::config::{load_config, Config};
use crate::store::FileStore;

/// Load the configuration and open the ledger it points at, validating the
/// chain before handing it to the caller.
pub fn open_chain_from_config() -> Result<(Config, Chain), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = FileStore::new(&config.ledger.path);
    let chain = Chain::load(Box::new(store))?;
    Ok((config, chain))
}

/// Short display form of a hex digest.
pub fn short_digest(digest: &str) -> String {
    if digest.len() > 12 {
        format!("{}...", &digest[..12])
    } else {
        digest.to_string()
    }
}

/// One-line summary of a block for listings.
pub fn describe_block(block: &Block) -> String {
    match &block.event {
        Event::Mint {
            fingerprint,
            student,
            course,
            year,
            ..
        } => format!(
            "#{} MINT | student: {} | course: {} | year: {} | cert: {} | time: {}",
            block.index,
            student,
            course,
            year,
            short_digest(fingerprint),
            block.timestamp
        ),
        Event::Transfer {
            fingerprint,
            from_owner,
            to_owner,
        } => format!(
            "#{} TRANSFER | cert: {} | from: {} | to: {} | time: {}",
            block.index,
            short_digest(fingerprint),
            from_owner,
            to_owner,
            block.timestamp
        ),
    }
}
