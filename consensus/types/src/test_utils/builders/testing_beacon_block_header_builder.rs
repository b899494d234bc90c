use crate::*;

/// Builds a beacon block header to be used for testing purposes.
#[derive(Default)]
pub struct TestingBeaconBlockHeaderBuilder {
    pub header: BeaconBlockHeader,
}

impl TestingBeaconBlockHeaderBuilder {
    /// Create a new builder with an all-zero header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for an empty block at `state.slot + 1` that extends
    /// `state.latest_block_header`.
    ///
    /// If the latest block header has not yet had its state root filled in, the root of `state`
    /// is used in its place, exactly as the next slot advance will do.
    pub fn for_next_slot<E: EthSpec>(state: &BeaconState<E>) -> Self {
        let mut previous_block_header = state.latest_block_header.clone();
        if previous_block_header.state_root == Hash256::zero() {
            previous_block_header.state_root = state.canonical_root();
        }

        let mut builder = Self::new();
        builder
            .set_slot(state.slot + 1)
            .set_parent_root(previous_block_header.canonical_root());
        builder
    }

    /// Set the slot of the header.
    pub fn set_slot(&mut self, slot: Slot) -> &mut Self {
        self.header.slot = slot;
        self
    }

    /// Set the parent root of the header.
    pub fn set_parent_root(&mut self, root: Hash256) -> &mut Self {
        self.header.parent_root = root;
        self
    }

    /// Set the body root of the header.
    pub fn set_body_root(&mut self, root: Hash256) -> &mut Self {
        self.header.body_root = root;
        self
    }

    /// Set the state root of the header.
    pub fn set_state_root(&mut self, root: Hash256) -> &mut Self {
        self.header.state_root = root;
        self
    }

    /// Attach an opaque signature to the header. Bytes beyond the maximum length are dropped.
    pub fn set_signature(&mut self, signature: &[u8]) -> &mut Self {
        self.header.signature = SignatureBytes::from(signature.to_vec());
        self
    }

    pub fn build(self) -> BeaconBlockHeader {
        self.header
    }
}
