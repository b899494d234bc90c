use crate::test_utils::TestRandom;
use crate::*;
use rand::RngCore;
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// A header of a `BeaconBlock`.
///
/// The proposer `signature` is carried opaquely: it is neither verified here nor included in the
/// header's root, so a child block links to its parent independently of the parent's signature.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
    #[tree_hash(skip_hashing)]
    pub signature: SignatureBytes,
}

impl BeaconBlockHeader {
    /// Returns the `tree_hash_root` of the header.
    ///
    /// This is the root a child block must reference as its `parent_root`.
    pub fn canonical_root(&self) -> Hash256 {
        self.tree_hash_root()
    }

    /// Returns a header suitable for `BeaconState::latest_block_header`.
    ///
    /// The `state_root` is zeroed: the post-state root is not yet known when a block is applied,
    /// and is filled in by the next call to per-slot processing.
    pub fn temporary_block_header(&self) -> Self {
        Self {
            state_root: Hash256::zero(),
            ..self.clone()
        }
    }
}

impl TestRandom for BeaconBlockHeader {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        Self {
            slot: Slot::random_for_test(rng),
            parent_root: Hash256::random_for_test(rng),
            state_root: Hash256::random_for_test(rng),
            body_root: Hash256::random_for_test(rng),
            signature: SignatureBytes::random_for_test(rng),
        }
    }
}
