use crate::*;
use ethereum_hashing::hash;

/// Builds a beacon state to be used for testing purposes.
///
/// Every validator is active from genesis with the maximum effective balance, and carries a
/// deterministic public key derived from its index.
pub struct TestingBeaconStateBuilder<E: EthSpec> {
    state: BeaconState<E>,
}

impl<E: EthSpec> TestingBeaconStateBuilder<E> {
    /// Creates a state with `validator_count` active validators at the genesis slot.
    pub fn new(validator_count: usize, spec: &ChainSpec) -> Self {
        let mut state = BeaconState::new(0, spec);

        for i in 0..validator_count {
            state
                .push_validator(Validator::active_from_genesis(
                    deterministic_pubkey(i),
                    spec,
                ))
                .expect("validator count should be below the registry limit");
        }

        for (i, mix) in state.randao_mixes.iter_mut().enumerate() {
            *mix = Hash256::from_slice(&hash(&(i as u64).to_le_bytes()));
        }

        Self { state }
    }

    /// Sets the `BeaconState` to be in `slot` without running any slot processing.
    ///
    /// The latest block header is moved to the same slot, as if a block had just been applied.
    pub fn teleport_to_slot(&mut self, slot: Slot) -> &mut Self {
        self.state.slot = slot;
        self.state.latest_block_header.slot = slot;
        self
    }

    /// Replaces the randomness used for seed generation with `mix` at every epoch.
    pub fn set_randao_mixes(&mut self, mix: Hash256) -> &mut Self {
        for existing in self.state.randao_mixes.iter_mut() {
            *existing = mix;
        }
        self
    }

    /// Mutable access to the state being built, for one-off overrides.
    pub fn state_mut(&mut self) -> &mut BeaconState<E> {
        &mut self.state
    }

    pub fn build(self) -> BeaconState<E> {
        self.state
    }
}

/// Returns a fake, unique 48-byte public key for validator `index`.
fn deterministic_pubkey(index: usize) -> PublicKeyBytes {
    let mut bytes = vec![0; 48];
    bytes[0..8].copy_from_slice(&(index as u64).to_le_bytes());
    PublicKeyBytes::new(bytes).expect("48 bytes provided")
}
