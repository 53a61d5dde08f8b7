//! Cross-chain signal proof assembly.
//!
//! Builds the ABI-encoded inclusion proofs a bridge verifier contract needs
//! to accept a cross-chain message: claim proofs ("the signal was sent on
//! the source chain") and release proofs ("the message failed on the
//! destination chain"), with optional relaying through intermediate hop
//! chains.
//!
//! ## Components
//!
//! - **slot**: deterministic signal slot derivation
//! - **transport**: `eth_getProof` and contract-read seams over alloy
//! - **proof**: storage proof validation, RLP and ABI encoding
//! - **assembler**: claim and release proof pipelines
//! - **config**: routing table (chain pair -> contract addresses, hops)
//! - **bindings**: contract interfaces and wire structs
//! - **error**: error types

#![allow(async_fn_in_trait)]

pub mod assembler;
pub mod bindings;
pub mod config;
pub mod error;
pub mod proof;
pub mod slot;
pub mod transport;

pub use assembler::{ProofRequest, SignalProofAssembler};
pub use bindings::{HopProof, SignalProof};
pub use config::{HopDescriptor, RoutingEntry, RoutingTable};
pub use error::{ProverError, Result};
pub use proof::{
    MessageStatus, StorageProofEntry, StorageProofRecord, MESSAGE_FAILED_VALUE, SIGNAL_SENT_VALUE,
};
pub use slot::signal_slot;
pub use transport::{BlockRef, ChainReader, ProofTransport, RpcClients, SyncedSnippet};
