use crate::per_slot_processing;
use types::test_utils::{TestingBeaconBlockHeaderBuilder, TestingBeaconStateBuilder};
use types::*;

/// Produces a state advanced by one slot together with an empty header for that slot.
pub struct BlockProcessingBuilder<E: EthSpec> {
    pub state_builder: TestingBeaconStateBuilder<E>,
    pub num_validators: usize,
}

impl<E: EthSpec> BlockProcessingBuilder<E> {
    pub fn new(num_validators: usize, spec: &ChainSpec) -> Self {
        let state_builder = TestingBeaconStateBuilder::new(num_validators, spec);

        Self {
            state_builder,
            num_validators,
        }
    }

    pub fn set_slot(&mut self, slot: Slot) {
        self.state_builder.teleport_to_slot(slot);
    }

    pub fn state_mut(&mut self) -> &mut BeaconState<E> {
        self.state_builder.state_mut()
    }

    /// Returns `(block, state)` where `state` has been advanced one slot and `block` is an
    /// empty header for the new slot.
    ///
    /// `previous_block_root` overrides the parent root of the block when supplied.
    pub fn build(self, previous_block_root: Option<Hash256>) -> (BeaconBlockHeader, BeaconState<E>) {
        let state = self.state_builder.build();
        let mut builder = TestingBeaconBlockHeaderBuilder::for_next_slot(&state);

        if let Some(root) = previous_block_root {
            builder.set_parent_root(root);
        }

        let state = per_slot_processing(state, None).unwrap();

        (builder.build(), state)
    }
}
