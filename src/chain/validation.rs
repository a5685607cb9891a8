//! Whole-chain integrity validation
//!
//! This is the authoritative tamper-detection walk: it recomputes every
//! digest, re-checks every link and replays ownership from block 0. It never
//! mutates anything and always reports the earliest offending block.

use crate::block::{Block, Event, GENESIS_DIGEST};
use crate::error::ChainError;
use std::collections::HashMap;

/// Validate the full block sequence.
///
/// Checks, per block and in this order: index contiguity, previous-digest
/// linkage, content digest, then the mint-before-transfer and ownership
/// invariants. The first failure is returned as `ChainCorrupted`.
pub fn validate_chain(blocks: &[Block]) -> Result<(), ChainError> {
    // fingerprint -> current holder, rebuilt by replay
    let mut holders: HashMap<&str, &str> = HashMap::new();
    let mut previous_digest = GENESIS_DIGEST;

    for (i, block) in blocks.iter().enumerate() {
        let index = i as u64;
        if block.index != index {
            return Err(ChainError::ChainCorrupted {
                index,
                reason: format!("expected index {}, found {}", index, block.index),
            });
        }

        if block.previous_digest != previous_digest {
            return Err(ChainError::ChainCorrupted {
                index,
                reason: format!(
                    "previous-digest mismatch: expected {}, found {}",
                    previous_digest, block.previous_digest
                ),
            });
        }

        if block.compute_digest() != block.digest {
            return Err(ChainError::ChainCorrupted {
                index,
                reason: "stored digest does not match block content".to_string(),
            });
        }

        match &block.event {
            Event::Mint {
                fingerprint, owner, ..
            } => {
                if holders.contains_key(fingerprint.as_str()) {
                    return Err(ChainError::ChainCorrupted {
                        index,
                        reason: format!("duplicate mint for certificate {}", fingerprint),
                    });
                }
                holders.insert(fingerprint.as_str(), owner.as_str());
            }
            Event::Transfer {
                fingerprint,
                from_owner,
                to_owner,
            } => match holders.get_mut(fingerprint.as_str()) {
                None => {
                    return Err(ChainError::ChainCorrupted {
                        index,
                        reason: format!("transfer without prior mint for {}", fingerprint),
                    });
                }
                Some(holder) => {
                    if *holder != from_owner {
                        return Err(ChainError::ChainCorrupted {
                            index,
                            reason: format!(
                                "transfer from {} but current holder is {}",
                                from_owner, holder
                            ),
                        });
                    }
                    *holder = to_owner.as_str();
                }
            },
        }

        previous_digest = &block.digest;
    }

    Ok(())
}
