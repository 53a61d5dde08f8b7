//! Signal slot derivation.
//!
//! A cross-chain signal is identified by a deterministic storage slot in the
//! signal service contract. The slot must match the on-chain derivation
//! byte-for-byte or the verifier rejects the proof.

use alloy::primitives::{keccak256, Address, B256};

/// Domain tag prefixed to every signal slot (must match the Solidity constant).
pub const SIGNAL_TAG: &str = "SIGNAL";

/// Compute the storage slot for a signal sent by `contract` on `chain_id`.
///
/// Packed encoding of `("SIGNAL", uint64 chainId, address contract, bytes32 msgHash)`
/// hashed with keccak256, the same convention as `abi.encodePacked` on-chain.
pub fn signal_slot(chain_id: u64, contract: Address, msg_hash: B256) -> B256 {
    let mut data = Vec::with_capacity(SIGNAL_TAG.len() + 8 + 20 + 32);
    data.extend_from_slice(SIGNAL_TAG.as_bytes());
    data.extend_from_slice(&chain_id.to_be_bytes());
    data.extend_from_slice(contract.as_slice());
    data.extend_from_slice(msg_hash.as_slice());

    keccak256(&data)
}
