#![no_std]

use alloy_sol_types::sol;

sol! {
    /// Data structures shared by the TaikoL1 settlement contract and its provers.
    #[sol(all_derives)]
    library TaikoData {
        /// Per block record kept by TaikoL1 once a block is proposed.
        /// The metaHash commits to the full proposal metadata and is the value
        /// every piece of evidence for this block must carry.
        struct Block {
            bytes32 metaHash;
            address assignedProver;
            uint96 livenessBond;
            uint64 blockId;
            uint64 proposedAt;
            uint64 proposedIn;
            uint32 nextTransitionId;
            uint32 verifiedTransitionId;
        }

        /// The evidence submitted to `proveBlock`. For the SGX + PSE zkEVM tier
        /// the proof starts with a two bytes big endian circuit index.
        struct BlockEvidence {
            bytes32 metaHash;
            bytes32 parentHash;
            bytes32 blockHash;
            bytes32 signalRoot;
            bytes32 graffiti;
            uint16 tier;
            bytes proof;
        }
    }

    #[sol(all_derives)]
    interface TaikoL1 {
        /// Emitted once a transition of a block has been proven with a given tier.
        event TransitionProved(
            uint256 indexed blockId,
            bytes32 parentHash,
            bytes32 blockHash,
            bytes32 signalRoot,
            address prover,
            uint96 validityBond,
            uint16 tier
        );

        function getBlock(uint64 blockId) external view returns (TaikoData.Block memory blk);
    }

    #[sol(all_derives)]
    interface TaikoL2 {
        /// The anchor call every L2 block must start with.
        function anchor(
            bytes32 l1BlockHash,
            bytes32 l1SignalRoot,
            uint64 l1Height,
            uint32 parentGasUsed
        ) external;
    }
}
