#![cfg(test)]
use super::*;
use crate::test_utils::{SeedableRng, TestingBeaconStateBuilder, XorShiftRng};

type E = MinimalEthSpec;

fn state_with_validators(count: usize) -> (BeaconState<E>, ChainSpec) {
    let spec = E::default_spec();
    let state = TestingBeaconStateBuilder::new(count, &spec).build();
    (state, spec)
}

#[test]
fn new_state_is_at_genesis() {
    let spec = E::default_spec();
    let state: BeaconState<E> = BeaconState::new(42, &spec);

    assert_eq!(state.genesis_time, 42);
    assert_eq!(state.slot, spec.genesis_slot);
    assert_eq!(state.latest_block_header.slot, spec.genesis_slot);
    assert!(state.validators().is_empty());
    assert_eq!(state.block_roots.len(), E::slots_per_historical_root());
    assert_eq!(state.randao_mixes.len(), E::epochs_per_historical_vector());
}

#[test]
fn get_validator_is_bounds_checked() {
    let (mut state, _) = state_with_validators(4);

    assert!(state.get_validator(3).is_ok());
    assert_eq!(state.get_validator(4), Err(Error::UnknownValidator(4)));
    assert_eq!(
        state.get_validator_mut(99).map(|_| ()),
        Err(Error::UnknownValidator(99))
    );
}

#[test]
fn active_validator_indices_skip_inactive() {
    let (mut state, _) = state_with_validators(6);

    state.get_validator_mut(1).unwrap().activation_epoch = Epoch::new(2);
    state.get_validator_mut(4).unwrap().exit_epoch = Epoch::new(1);

    assert_eq!(
        state.get_active_validator_indices(Epoch::new(0)),
        vec![0, 2, 3, 4, 5]
    );
    assert_eq!(
        state.get_active_validator_indices(Epoch::new(2)),
        vec![0, 1, 2, 3, 5]
    );
}

#[test]
fn block_roots_are_only_available_for_recent_slots() {
    let (mut state, _) = state_with_validators(1);
    state.slot = Slot::new(100);
    let root = Hash256::repeat_byte(3);

    state.set_block_root(Slot::new(99), root).unwrap();
    assert_eq!(state.get_block_root(Slot::new(99)), Ok(&root));

    assert_eq!(
        state.get_block_root(Slot::new(100)),
        Err(Error::SlotOutOfBounds)
    );
    let oldest = 100 - E::slots_per_historical_root() as u64;
    assert!(state.get_block_root(Slot::new(oldest)).is_ok());
    assert_eq!(
        state.get_block_root(Slot::new(oldest - 1)),
        Err(Error::SlotOutOfBounds)
    );
}

#[test]
fn state_roots_wrap_around() {
    let (mut state, _) = state_with_validators(1);
    let n = E::slots_per_historical_root() as u64;
    state.slot = Slot::new(n + 10);

    state
        .set_state_root(Slot::new(n + 3), Hash256::repeat_byte(9))
        .unwrap();

    assert_eq!(state.state_roots[3], Hash256::repeat_byte(9));
}

#[test]
fn randao_mix_bounds() {
    let (mut state, _) = state_with_validators(1);
    state.slot = Epoch::new(3).start_slot(E::slots_per_epoch());

    state
        .set_randao_mix(Epoch::new(3), Hash256::repeat_byte(1))
        .unwrap();
    assert_eq!(
        state.get_randao_mix(Epoch::new(3)),
        Ok(&Hash256::repeat_byte(1))
    );
    assert_eq!(
        state.get_randao_mix(Epoch::new(4)),
        Err(Error::EpochOutOfBounds)
    );
}

#[test]
fn seed_depends_on_epoch_and_mix() {
    let (mut state, spec) = state_with_validators(1);

    let a = state.get_seed(Epoch::new(0), Domain::BeaconProposer, &spec);
    let b = state.get_seed(Epoch::new(1), Domain::BeaconProposer, &spec);
    assert_ne!(a, b);

    for mix in state.randao_mixes.iter_mut() {
        *mix = Hash256::repeat_byte(0xee);
    }
    assert_ne!(
        state.get_seed(Epoch::new(0), Domain::BeaconProposer, &spec),
        a
    );
}

#[test]
fn proposer_index_is_deterministic_and_in_range() {
    let (mut state, spec) = state_with_validators(16);
    state.slot = Slot::new(6);

    let first = state.get_beacon_proposer_index(Slot::new(6), &spec).unwrap();
    let second = state.get_beacon_proposer_index(Slot::new(6), &spec).unwrap();

    assert_eq!(first, second);
    assert!(first < 16);
}

#[test]
fn proposer_index_only_for_current_epoch() {
    let (mut state, spec) = state_with_validators(16);
    state.slot = Slot::new(6);

    let next_epoch_slot = Epoch::new(1).start_slot(E::slots_per_epoch());
    assert_eq!(
        state.get_beacon_proposer_index(next_epoch_slot, &spec),
        Err(Error::SlotOutOfBounds)
    );
}

#[test]
fn proposer_index_requires_active_validators() {
    let (state, spec) = state_with_validators(0);

    assert_eq!(
        state.get_beacon_proposer_index(Slot::new(0), &spec),
        Err(Error::InsufficientValidators)
    );
}

#[test]
fn proposer_indices_cover_the_epoch() {
    let (state, spec) = state_with_validators(16);

    let proposers = state.get_beacon_proposer_indices(&spec).unwrap();

    assert_eq!(proposers.len() as u64, E::slots_per_epoch());
    for (offset, proposer) in proposers.iter().enumerate() {
        let slot = Slot::new(offset as u64);
        assert_eq!(
            state.get_beacon_proposer_index(slot, &spec).as_ref(),
            Ok(proposer)
        );
    }
}

#[test]
fn only_active_validators_propose() {
    let (mut state, spec) = state_with_validators(4);
    for i in [0, 1, 3] {
        state.get_validator_mut(i).unwrap().activation_epoch = spec.far_future_epoch;
    }

    for slot in 0..E::slots_per_epoch() {
        assert_eq!(
            state.get_beacon_proposer_index(Slot::new(slot), &spec),
            Ok(2)
        );
    }
}

#[test]
fn canonical_root_tracks_contents() {
    let (state, _) = state_with_validators(4);
    let mut other = state.clone();

    assert_eq!(state.canonical_root(), other.canonical_root());

    other.get_validator_mut(0).unwrap().slashed = true;
    assert_ne!(state.canonical_root(), other.canonical_root());
}

#[test]
fn random_state_ssz_round_trip() {
    use ssz::{Decode, Encode};

    let mut rng = XorShiftRng::from_seed([42; 16]);
    let state = BeaconState::<E>::random_for_test(&mut rng);

    let decoded = BeaconState::<E>::from_ssz_bytes(&state.as_ssz_bytes()).unwrap();
    assert_eq!(decoded, state);
}
