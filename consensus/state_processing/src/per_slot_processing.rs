use safe_arith::{ArithError, SafeArith};
use types::*;

#[derive(Debug, PartialEq)]
pub enum Error {
    BeaconStateError(BeaconStateError),
    ArithError(ArithError),
}

/// Advances a state forward by one slot.
///
/// The roots of the pre-advance state and of its latest block header are recorded in the
/// rolling history for the slot being left, then `state.slot` is incremented by exactly one.
/// No validation is performed; the only failure is the slot counter overflowing.
///
/// If the root of the supplied `state` is known, then it can be passed as `state_root`. If
/// `state_root` is `None`, the root of `state` will be computed from scratch.
///
/// The state is taken by value and the advanced state is returned, so a caller holding a
/// snapshot never observes a half-advanced state. Calling this twice advances two slots.
pub fn per_slot_processing<E: EthSpec>(
    mut state: BeaconState<E>,
    state_root: Option<Hash256>,
) -> Result<BeaconState<E>, Error> {
    cache_state(&mut state, state_root)?;

    Ok(state)
}

fn cache_state<E: EthSpec>(
    state: &mut BeaconState<E>,
    state_root: Option<Hash256>,
) -> Result<(), Error> {
    let previous_state_root = match state_root {
        Some(root) => root,
        None => state.canonical_root(),
    };

    // Fill in the latest block header state root if a block was applied in this slot.
    if state.latest_block_header.state_root == Hash256::zero() {
        state.latest_block_header.state_root = previous_state_root;
    }
    let latest_block_root = state.latest_block_header.canonical_root();

    // The root getters and setters only address slots strictly before `state.slot`, so the slot
    // is incremented first and the roots are then stored against the slot that was left.
    let previous_slot = state.slot;
    state.slot.safe_add_assign(1)?;

    state.set_state_root(previous_slot, previous_state_root)?;
    state.set_block_root(previous_slot, latest_block_root)?;

    Ok(())
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Error {
        Error::BeaconStateError(e)
    }
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Self {
        Self::ArithError(e)
    }
}
