use alloy_primitives::U256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("config error: {0}")]
    Config(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("synced block for chain {chain_id} is not available yet")]
    PendingBlock { chain_id: u64 },

    #[error("proof generation error: {0}")]
    ProofGeneration(String),

    #[error("invalid proof: storage value is {actual}, expected {expected}")]
    InvalidProof { expected: U256, actual: U256 },

    #[error("wrong bridge config for route {src_chain_id} -> {dest_chain_id}: {reason}")]
    WrongBridgeConfig {
        src_chain_id: u64,
        dest_chain_id: u64,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ProverError>;
