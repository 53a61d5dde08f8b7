//! Signal proof assembly.
//!
//! One assembler covers both route shapes: a direct route encodes with an
//! empty hop list, a relayed route folds over the configured hops in order.
//! Each hop's proof depends on the previous step's state root, so the
//! traversal is strictly sequential; running hops concurrently would prove
//! the wrong roots, not just waste work.

use alloy::primitives::{Address, Bytes, B256, U256};
use tracing::{debug, info};

use crate::{
    bindings::HopProof,
    config::{HopDescriptor, RoutingTable},
    error::{ProverError, Result},
    proof::{encode_signal_proof, MessageStatus, MESSAGE_FAILED_VALUE, SIGNAL_SENT_VALUE},
    slot::signal_slot,
    transport::{BlockRef, ChainReader, ProofTransport},
};

/// One proof-generation attempt for a bridged message.
#[derive(Debug, Clone, Copy)]
pub struct ProofRequest {
    pub msg_hash: B256,
    pub src_chain_id: u64,
    pub dest_chain_id: u64,
    /// Block the message was included in on the source chain. A claim is
    /// not provable until the anchored height covers this block.
    pub message_block_number: u64,
}

/// Assembles encoded signal proofs from routing config and RPC access.
///
/// Stateless; every attempt resolves everything fresh. Failures are terminal
/// for the attempt and surface unmodified, the caller decides whether to
/// retry later.
pub struct SignalProofAssembler<'a, C> {
    routing: &'a RoutingTable,
    client: &'a C,
}

impl<'a, C> SignalProofAssembler<'a, C>
where
    C: ProofTransport + ChainReader,
{
    pub fn new(routing: &'a RoutingTable, client: &'a C) -> Self {
        Self { routing, client }
    }

    /// Prove that the message signal was sent on the source chain, so the
    /// destination bridge can process ("claim") it.
    pub async fn prove_claimable(&self, req: &ProofRequest) -> Result<Bytes> {
        let entry = self.routing.route(req.src_chain_id, req.dest_chain_id)?;

        let hops: &[HopDescriptor] = match entry.hops.as_deref() {
            Some([]) => {
                return Err(ProverError::WrongBridgeConfig {
                    src_chain_id: req.src_chain_id,
                    dest_chain_id: req.dest_chain_id,
                    reason: "hop list declared but empty".to_string(),
                })
            }
            Some(hops) => hops,
            None => &[],
        };

        // The source chain's provable height is whatever the first relay in
        // the route has anchored: the first hop, or the destination itself.
        let (observer_chain, observer_sync) = hops
            .first()
            .map(|hop| (hop.chain_id, hop.cross_chain_sync_address))
            .unwrap_or((req.dest_chain_id, entry.cross_chain_sync_address));

        let block = self
            .anchored_block(observer_chain, observer_sync, req.src_chain_id)
            .await?;

        if block.number < req.message_block_number {
            debug!(
                synced = block.number,
                message_block = req.message_block_number,
                "Message block not yet covered by synced height"
            );
            return Err(ProverError::PendingBlock {
                chain_id: req.src_chain_id,
            });
        }

        let key = signal_slot(req.src_chain_id, entry.bridge_address, req.msg_hash);
        let record = self
            .client
            .get_storage_proof(
                req.src_chain_id,
                entry.signal_service_address,
                key,
                block.number,
            )
            .await?;
        let storage_proof = record.into_proof_bytes(SIGNAL_SENT_VALUE)?;
        let height = block.number;

        // Fold over the hops, threading the previous chain and its state
        // root into each step. Order is load-bearing: the verifier replays
        // the segments in this order to re-derive the final root.
        let mut segments = Vec::with_capacity(hops.len());
        let mut prev_chain_id = req.src_chain_id;
        let mut current_root = block.state_root;

        for (i, hop) in hops.iter().enumerate() {
            let (observer_chain, observer_sync) = hops
                .get(i + 1)
                .map(|next| (next.chain_id, next.cross_chain_sync_address))
                .unwrap_or((req.dest_chain_id, entry.cross_chain_sync_address));

            let hop_block = self
                .anchored_block(observer_chain, observer_sync, hop.chain_id)
                .await?;

            let key = signal_slot(prev_chain_id, hop.cross_chain_sync_address, current_root);
            let record = self
                .client
                .get_storage_proof(
                    hop.chain_id,
                    hop.signal_service_address,
                    key,
                    hop_block.number,
                )
                .await?;
            let proof = record.into_proof_bytes(SIGNAL_SENT_VALUE)?;

            segments.push(HopProof {
                signalRootRelay: hop.cross_chain_sync_address,
                signalRoot: current_root,
                storageProof: proof,
            });

            prev_chain_id = hop.chain_id;
            current_root = hop_block.state_root;
        }

        info!(
            msg_hash = %req.msg_hash,
            src_chain_id = req.src_chain_id,
            dest_chain_id = req.dest_chain_id,
            height,
            hops = segments.len(),
            "Assembled claim proof"
        );

        Ok(encode_signal_proof(
            entry.cross_chain_sync_address,
            height,
            storage_proof,
            segments,
        ))
    }

    /// Prove that the message failed on the destination chain, so the source
    /// bridge can release the locked funds.
    ///
    /// Reads the reverse routing entry: bridge and signal service on the
    /// destination chain, cross-chain sync on the source chain. Hops are not
    /// threaded through on this path even when the reverse entry declares
    /// them; the route is proved directly.
    pub async fn prove_failed(&self, req: &ProofRequest) -> Result<Bytes> {
        let reverse = self.routing.route(req.dest_chain_id, req.src_chain_id)?;

        let status = self
            .client
            .message_status(req.dest_chain_id, reverse.bridge_address, req.msg_hash)
            .await?;
        if status != MessageStatus::Failed {
            debug!(?status, msg_hash = %req.msg_hash, "Message is not in failed status");
            return Err(ProverError::InvalidProof {
                expected: MESSAGE_FAILED_VALUE,
                actual: U256::from(status as u8),
            });
        }

        let block = self
            .anchored_block(
                req.src_chain_id,
                reverse.cross_chain_sync_address,
                req.dest_chain_id,
            )
            .await?;

        let key = signal_slot(req.dest_chain_id, reverse.bridge_address, req.msg_hash);
        let record = self
            .client
            .get_storage_proof(req.dest_chain_id, reverse.bridge_address, key, block.number)
            .await?;
        let storage_proof = record.into_proof_bytes(MESSAGE_FAILED_VALUE)?;

        info!(
            msg_hash = %req.msg_hash,
            src_chain_id = req.src_chain_id,
            dest_chain_id = req.dest_chain_id,
            height = block.number,
            "Assembled release proof"
        );

        Ok(encode_signal_proof(
            reverse.cross_chain_sync_address,
            block.number,
            storage_proof,
            Vec::new(),
        ))
    }

    /// Resolve the block of `anchored_chain` that `observer_chain`'s
    /// cross-chain sync contract has anchored.
    async fn anchored_block(
        &self,
        observer_chain: u64,
        cross_chain_sync: Address,
        anchored_chain: u64,
    ) -> Result<BlockRef> {
        let snippet = self
            .client
            .synced_snippet(observer_chain, cross_chain_sync)
            .await?;

        if snippet.block_hash.is_zero() {
            return Err(ProverError::PendingBlock {
                chain_id: anchored_chain,
            });
        }

        self.client
            .block_by_hash(anchored_chain, snippet.block_hash)
            .await?
            .ok_or(ProverError::PendingBlock {
                chain_id: anchored_chain,
            })
    }
}
