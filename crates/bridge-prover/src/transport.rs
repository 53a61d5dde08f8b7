//! RPC seams for proof fetching and contract reads.
//!
//! The assembler never talks to a node directly: `eth_getProof` goes through
//! [`ProofTransport`] and plain contract reads go through [`ChainReader`],
//! so batched or caching transports can be substituted without touching the
//! assembly logic. [`RpcClients`] is the alloy-backed implementation.

use alloy::{
    eips::BlockId,
    primitives::{Address, B256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{EIP1186AccountProofResponse, TransactionRequest},
    sol_types::SolCall,
};
use std::collections::HashMap;
use tracing::debug;

use crate::{
    bindings::{IBridge, ICrossChainSync},
    error::{ProverError, Result},
    proof::{MessageStatus, StorageProofEntry, StorageProofRecord},
};

/// Latest synced snippet from a cross-chain sync contract.
#[derive(Debug, Clone, Copy)]
pub struct SyncedSnippet {
    pub block_hash: B256,
    pub signal_root: B256,
}

/// Resolved block reference on a specific chain.
#[derive(Debug, Clone, Copy)]
pub struct BlockRef {
    pub number: u64,
    pub hash: B256,
    pub state_root: B256,
}

/// `eth_getProof` (EIP-1186) access for one storage key.
///
/// The only component that fetches inclusion proofs; implementations own
/// timeouts and cancellation, failures surface as [`ProverError::Client`].
pub trait ProofTransport {
    async fn get_storage_proof(
        &self,
        chain_id: u64,
        contract: Address,
        key: B256,
        block_number: u64,
    ) -> Result<StorageProofRecord>;
}

/// Plain contract reads the assembler needs besides proofs.
pub trait ChainReader {
    /// Latest synced snippet from a cross-chain sync contract.
    async fn synced_snippet(
        &self,
        chain_id: u64,
        cross_chain_sync: Address,
    ) -> Result<SyncedSnippet>;

    /// Resolve a block by hash. `None` when the node does not know the block
    /// (not yet confirmed on this endpoint).
    async fn block_by_hash(&self, chain_id: u64, hash: B256) -> Result<Option<BlockRef>>;

    /// Message status from the bridge contract.
    async fn message_status(
        &self,
        chain_id: u64,
        bridge: Address,
        msg_hash: B256,
    ) -> Result<MessageStatus>;
}

/// Read-only provider with the default fillers.
type ReadOnlyProvider = alloy::providers::fillers::FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::Identity,
        alloy::providers::fillers::JoinFill<
            alloy::providers::fillers::GasFiller,
            alloy::providers::fillers::JoinFill<
                alloy::providers::fillers::BlobGasFiller,
                alloy::providers::fillers::JoinFill<
                    alloy::providers::fillers::NonceFiller,
                    alloy::providers::fillers::ChainIdFiller,
                >,
            >,
        >,
    >,
    RootProvider,
>;

/// One alloy provider per chain id.
///
/// Not every RPC endpoint supports `eth_getProof`; that is an external
/// constraint on the endpoints chosen here, not something this client can
/// work around.
pub struct RpcClients {
    providers: HashMap<u64, ReadOnlyProvider>,
}

impl RpcClients {
    /// Connect a provider for every `(chain_id, rpc_url)` pair.
    pub async fn connect(endpoints: &HashMap<u64, String>) -> Result<Self> {
        let mut providers = HashMap::with_capacity(endpoints.len());
        for (&chain_id, url) in endpoints {
            let provider = ProviderBuilder::new()
                .connect(url)
                .await
                .map_err(|e| ProverError::Client(format!("chain {chain_id}: {e}")))?;
            providers.insert(chain_id, provider);
        }
        Ok(Self { providers })
    }

    fn provider(&self, chain_id: u64) -> Result<&ReadOnlyProvider> {
        self.providers
            .get(&chain_id)
            .ok_or_else(|| ProverError::Client(format!("no RPC client for chain {chain_id}")))
    }
}

impl From<EIP1186AccountProofResponse> for StorageProofRecord {
    fn from(resp: EIP1186AccountProofResponse) -> Self {
        Self {
            balance: resp.balance,
            code_hash: resp.code_hash,
            nonce: resp.nonce,
            storage_hash: resp.storage_hash,
            account_proof: resp.account_proof,
            storage_proof: resp
                .storage_proof
                .into_iter()
                .map(|entry| StorageProofEntry {
                    key: entry.key.as_b256(),
                    value: entry.value,
                    proof: entry.proof,
                })
                .collect(),
        }
    }
}

impl ProofTransport for RpcClients {
    async fn get_storage_proof(
        &self,
        chain_id: u64,
        contract: Address,
        key: B256,
        block_number: u64,
    ) -> Result<StorageProofRecord> {
        debug!(chain_id, %contract, %key, block_number, "Fetching storage proof");

        let resp = self
            .provider(chain_id)?
            .get_proof(contract, vec![key])
            .block_id(BlockId::number(block_number))
            .await
            .map_err(|e| ProverError::Client(format!("eth_getProof on chain {chain_id}: {e}")))?;

        Ok(resp.into())
    }
}

impl ChainReader for RpcClients {
    async fn synced_snippet(
        &self,
        chain_id: u64,
        cross_chain_sync: Address,
    ) -> Result<SyncedSnippet> {
        let call = ICrossChainSync::getSyncedSnippetCall { blockId: 0 };
        let tx = TransactionRequest::default()
            .to(cross_chain_sync)
            .input(call.abi_encode().into());

        let out = self
            .provider(chain_id)?
            .call(tx)
            .await
            .map_err(|e| ProverError::Client(format!("getSyncedSnippet on chain {chain_id}: {e}")))?;

        let snippet = ICrossChainSync::getSyncedSnippetCall::abi_decode_returns(&out)
            .map_err(|e| ProverError::ProofGeneration(format!("malformed snippet: {e}")))?;

        Ok(SyncedSnippet {
            block_hash: snippet.blockHash,
            signal_root: snippet.signalRoot,
        })
    }

    async fn block_by_hash(&self, chain_id: u64, hash: B256) -> Result<Option<BlockRef>> {
        let block = self
            .provider(chain_id)?
            .get_block_by_hash(hash)
            .await
            .map_err(|e| ProverError::Client(format!("get_block_by_hash on chain {chain_id}: {e}")))?;

        Ok(block.map(|block| BlockRef {
            number: block.header.number,
            hash: block.header.hash,
            state_root: block.header.state_root,
        }))
    }

    async fn message_status(
        &self,
        chain_id: u64,
        bridge: Address,
        msg_hash: B256,
    ) -> Result<MessageStatus> {
        let call = IBridge::getMessageStatusCall { msgHash: msg_hash };
        let tx = TransactionRequest::default()
            .to(bridge)
            .input(call.abi_encode().into());

        let out = self
            .provider(chain_id)?
            .call(tx)
            .await
            .map_err(|e| ProverError::Client(format!("getMessageStatus on chain {chain_id}: {e}")))?;

        let raw = IBridge::getMessageStatusCall::abi_decode_returns(&out)
            .map_err(|e| ProverError::ProofGeneration(format!("malformed message status: {e}")))?;

        MessageStatus::try_from(raw)
    }
}
