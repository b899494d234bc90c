//! This module contains functions for advancing a `BeaconState` forward some number of slots
//! without blocks (i.e., skip slots).
//!
//! These functions are defined here to reduce code duplication and protect against some
//! easy-to-make mistakes when performing state advances.

use crate::*;
use types::{BeaconState, EthSpec, Hash256, Slot};

#[derive(Debug, PartialEq)]
pub enum Error {
    BadTargetSlot { target_slot: Slot, state_slot: Slot },
    PerSlotProcessing(per_slot_processing::Error),
}

/// Advances the `state` to the given `target_slot`, assuming that there were no blocks between
/// these slots.
///
/// ## Errors
///
/// - If `state.slot > target_slot`, an error will be returned.
pub fn complete_state_advance<E: EthSpec>(
    mut state: BeaconState<E>,
    mut state_root_opt: Option<Hash256>,
    target_slot: Slot,
) -> Result<BeaconState<E>, Error> {
    check_target_slot(state.slot, target_slot)?;

    while state.slot < target_slot {
        // Use the initial state root on the first iteration of the loop, then use `None`  for any
        // future iterations.
        let state_root_opt = state_root_opt.take();

        state = per_slot_processing(state, state_root_opt).map_err(Error::PerSlotProcessing)?;
    }

    Ok(state)
}

fn check_target_slot(state_slot: Slot, target_slot: Slot) -> Result<(), Error> {
    if state_slot > target_slot {
        Err(Error::BadTargetSlot {
            target_slot,
            state_slot,
        })
    } else {
        Ok(())
    }
}
