//! Contract interfaces and wire structs.
//!
//! `SignalProof` is the envelope the destination verifier decodes. Field
//! order and types are part of the on-chain protocol; changing them is a
//! breaking protocol version change, not a refactor.

use alloy::sol;

sol! {
    /// Cross-chain sync contract on the observing chain. Tracks which block
    /// of the remote chain has been anchored and is therefore provable.
    #[derive(Debug)]
    interface ICrossChainSync {
        struct Snippet {
            bytes32 blockHash;
            bytes32 signalRoot;
        }

        /// Returns the latest synced snippet when `blockId` is zero.
        function getSyncedSnippet(uint64 blockId) external view returns (Snippet memory);
    }

    /// Bridge contract message-status read, used by the release path.
    #[derive(Debug)]
    interface IBridge {
        function getMessageStatus(bytes32 msgHash) external view returns (uint8);
    }

    /// One link in the relay chain. `signalRoot` is the state root inherited
    /// from the previous link (the origin chain for the first hop); the
    /// verifier replays the links in order to re-derive the final root.
    #[derive(Debug, PartialEq, Eq)]
    struct HopProof {
        address signalRootRelay;
        bytes32 signalRoot;
        bytes storageProof;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct SignalProof {
        address crossChainSync;
        uint64 height;
        bytes storageProof;
        HopProof[] hops;
    }
}
