#![forbid(unsafe_code)]
//! CertChain command-line interface

use certchain::block::{Block, Event};
use certchain::cli::{open_chain_from_config, short_digest};
use certchain::fingerprint::file_digest;
use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "certchain",
    version,
    about = "Tamper-evident registry for academic certificates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a certificate and print its fingerprint
    Mint {
        #[arg(long)]
        student: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        year: String,
        /// Path to the certificate file (PDF/image)
        #[arg(long)]
        file: PathBuf,
        /// Initial holder; defaults to the student
        #[arg(long)]
        owner: Option<String>,
    },
    /// Transfer a certificate to a new holder
    Transfer {
        fingerprint: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Show the event history and current holder for a certificate
    History { fingerprint: String },
    /// Show only the current holder
    Owner { fingerprint: String },
    /// Verify the integrity of the whole ledger
    Verify,
    /// Print every block on the ledger
    Ledger,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let (config, mut chain) = open_chain_from_config()?;

    match cli.command {
        Command::Mint {
            student,
            course,
            year,
            file,
            owner,
        } => {
            let file_hash = file_digest(&file)?;
            let owner = owner.unwrap_or_else(|| student.clone());
            let fingerprint = chain.mint(&file_hash, &student, &course, &year, &owner)?;
            println!("{}", "Certificate minted.".green().bold());
            println!("Fingerprint: {}", fingerprint.cyan());
            println!("Holder:      {}", owner);
        }
        Command::Transfer {
            fingerprint,
            from,
            to,
        } => {
            chain.transfer(&fingerprint, &from, &to)?;
            println!("{}", "Transfer recorded.".green().bold());
            println!("{} -> {}", from, to.cyan());
        }
        Command::History { fingerprint } => {
            let view = chain.view(&fingerprint)?;
            println!(
                "{}",
                format!("Certificate {}", short_digest(&fingerprint)).bold()
            );
            println!("{}", history_table(&view.history));
            println!("Current holder: {}", view.current_owner.cyan().bold());
        }
        Command::Owner { fingerprint } => {
            let owner = chain.current_owner(&fingerprint)?;
            println!("{}", owner);
        }
        Command::Verify => match chain.validate() {
            Ok(()) => println!(
                "{} {} block(s), ledger intact",
                "OK".green().bold(),
                chain.len()
            ),
            Err(e) => {
                eprintln!("{} {}", "CORRUPTED".red().bold(), e);
                std::process::exit(1);
            }
        },
        Command::Ledger => {
            if chain.is_empty() {
                println!("Ledger {} is empty.", config.ledger.path);
            } else {
                println!("{}", history_table(chain.blocks()));
            }
        }
    }

    Ok(())
}

fn history_table(blocks: &[Block]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Block", "Event", "Details", "Time"]);

    for block in blocks {
        let (kind, details) = match &block.event {
            Event::Mint {
                student,
                course,
                year,
                owner,
                ..
            } => (
                "Mint",
                format!("{} | {} ({}) | holder: {}", student, course, year, owner),
            ),
            Event::Transfer {
                from_owner,
                to_owner,
                ..
            } => ("Transfer", format!("{} -> {}", from_owner, to_owner)),
        };
        table.add_row(vec![
            Cell::new(format!("#{}", block.index)),
            Cell::new(kind),
            Cell::new(details),
            Cell::new(&block.timestamp),
        ]);
    }
    table
}
