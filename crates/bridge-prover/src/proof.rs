//! Storage proof validation and encoding.
//!
//! Two nested encodings meet here and must not be conflated: the trie-node
//! byte strings of an `eth_getProof` response are RLP-encoded, and the
//! resulting blob is embedded in the ABI-encoded [`SignalProof`] envelope.

use alloy::{
    primitives::{Address, Bytes, B256, U256},
    sol_types::SolValue,
};
use alloy_rlp::RlpEncodable;

use crate::{
    bindings::{HopProof, SignalProof},
    error::{ProverError, Result},
};

/// Storage value the signal service writes for a sent signal.
pub const SIGNAL_SENT_VALUE: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Storage value of a message-status slot once the message has failed.
pub const MESSAGE_FAILED_VALUE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Bridge message lifecycle status, as stored on the destination bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageStatus {
    New = 0,
    Retriable = 1,
    Done = 2,
    Failed = 3,
}

impl TryFrom<u8> for MessageStatus {
    type Error = ProverError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::Retriable),
            2 => Ok(Self::Done),
            3 => Ok(Self::Failed),
            n => Err(ProverError::ProofGeneration(format!(
                "unknown message status {n}"
            ))),
        }
    }
}

/// Raw `eth_getProof` response for a single account.
#[derive(Debug, Clone)]
pub struct StorageProofRecord {
    pub balance: U256,
    pub code_hash: B256,
    pub nonce: u64,
    pub storage_hash: B256,
    pub account_proof: Vec<Bytes>,
    pub storage_proof: Vec<StorageProofEntry>,
}

/// Inclusion proof for one storage key.
#[derive(Debug, Clone)]
pub struct StorageProofEntry {
    pub key: B256,
    pub value: U256,
    pub proof: Vec<Bytes>,
}

/// Account proof and storage proof nodes as a two-element RLP list.
#[derive(RlpEncodable)]
struct TrieProof {
    account_proof: Vec<Bytes>,
    storage_proof: Vec<Bytes>,
}

impl StorageProofRecord {
    /// Validate the record and RLP-encode its trie nodes.
    ///
    /// Exactly one storage key is requested per call, so exactly one entry
    /// must come back; its value must equal `expected_value` or the signal
    /// is not in the state the caller is trying to prove.
    pub fn into_proof_bytes(self, expected_value: U256) -> Result<Bytes> {
        let mut entries = self.storage_proof;
        let entry = match entries.len() {
            1 => entries.remove(0),
            n => {
                return Err(ProverError::ProofGeneration(format!(
                    "expected exactly one storage proof entry, got {n}"
                )))
            }
        };

        if entry.value != expected_value {
            return Err(ProverError::InvalidProof {
                expected: expected_value,
                actual: entry.value,
            });
        }

        let trie = TrieProof {
            account_proof: self.account_proof,
            storage_proof: entry.proof,
        };
        Ok(alloy_rlp::encode(&trie).into())
    }
}

/// ABI-encode the full proof envelope for the on-chain verifier.
///
/// Hops are encoded in the order given; the verifier replays them in the
/// same order, so reordering here breaks verification.
pub fn encode_signal_proof(
    cross_chain_sync: Address,
    height: u64,
    storage_proof: Bytes,
    hops: Vec<HopProof>,
) -> Bytes {
    let proof = SignalProof {
        crossChainSync: cross_chain_sync,
        height,
        storageProof: storage_proof,
        hops,
    };
    proof.abi_encode().into()
}
