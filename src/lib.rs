//! CertChain - a tamper-evident, append-only registry for academic certificates
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`block`] - Block structure and the mint/transfer event payload
//! - [`chain`] - Append logic, chain validation and certificate queries
//! - [`fingerprint`] - Certificate fingerprinting (SHA-256)
//!
//! ## State Management
//! - [`store`] - Durable persistence (atomic JSON document)
//! - [`clock`] - Time source abstraction
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod block;
pub mod chain;
pub mod fingerprint;

// ============================================================================
// State Management
// ============================================================================
pub mod clock;
pub mod store;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
