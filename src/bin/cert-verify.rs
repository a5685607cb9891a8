#![forbid(unsafe_code)]
//! Standalone ledger audit: loads the raw document, walks every block and
//! prints a verdict. Unlike the main CLI this does not refuse to open a
//! corrupted ledger, so it can point at the first bad block.

use certchain::block::Event;
use certchain::chain::validate_chain;
use certchain::cli::describe_block;
use certchain::config::load_config;
use certchain::error::ChainError;
use certchain::store::{FileStore, LedgerStore};
use colored::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = load_config()?;
    let store = FileStore::new(&config.ledger.path);
    let blocks = store.load()?;

    println!("{}", "CertChain ledger audit".bold());
    println!("Ledger: {}", config.ledger.path);
    println!();

    for block in &blocks {
        println!("{}", describe_block(block));
    }
    if !blocks.is_empty() {
        println!();
    }

    let mints = blocks.iter().filter(|b| b.event.is_mint()).count();
    let transfers = blocks.len() - mints;
    println!("Blocks: {}  (mints: {}, transfers: {})", blocks.len(), mints, transfers);

    let certificates: std::collections::HashSet<&str> = blocks
        .iter()
        .filter_map(|b| match &b.event {
            Event::Mint { fingerprint, .. } => Some(fingerprint.as_str()),
            Event::Transfer { .. } => None,
        })
        .collect();
    println!("Certificates: {}", certificates.len());
    println!();

    match validate_chain(&blocks) {
        Ok(()) => {
            println!("{}", "Ledger intact: every digest and link verified.".green().bold());
            Ok(())
        }
        Err(ChainError::ChainCorrupted { index, reason }) => {
            eprintln!(
                "{} block #{}: {}",
                "Tampering detected at".red().bold(),
                index,
                reason
            );
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
