use crate::proposer_selection::{ProposerSelector, SeededProposerSelector};
use errors::{BlockProcessingError as Error, HeaderInvalid};
use rayon::prelude::*;
use types::*;

pub mod errors;

#[cfg(test)]
mod block_processing_builder;

/// Validates `block` against `state` and, if it is valid, returns a copy of `state` with `block`
/// recorded as the latest block header.
///
/// `state` must already have been advanced to `block.slot`. The state root of the stored header
/// is zeroed; it is filled in by the next call to `per_slot_processing`.
///
/// Rules are checked in order (slot, parent, proposer) and the first failure is returned. On
/// error `state` is unaffected.
pub fn process_block_header<E: EthSpec, S: ProposerSelector>(
    state: &BeaconState<E>,
    block: &BeaconBlockHeader,
    selector: &S,
    spec: &ChainSpec,
) -> Result<BeaconState<E>, Error> {
    // Verify that the slots match
    verify!(
        block.slot == state.slot,
        HeaderInvalid::StateSlotMismatch {
            state: state.slot,
            block: block.slot,
        }
    );

    let expected_previous_block_root = state.latest_block_header.canonical_root();
    verify!(
        block.parent_root == expected_previous_block_root,
        HeaderInvalid::ParentBlockRootMismatch {
            state: expected_previous_block_root,
            block: block.parent_root,
        }
    );

    // Verify proposer is not slashed
    let proposer_index = selector.select_proposer(state, spec)?;
    verify!(
        !state.get_validator(proposer_index)?.slashed,
        HeaderInvalid::ProposerSlashed(proposer_index)
    );

    let mut state = state.clone();
    state.latest_block_header = block.temporary_block_header();

    Ok(state)
}

/// `process_block_header` using the seeded, balance-weighted proposer selection.
pub fn process_block_header_default<E: EthSpec>(
    state: &BeaconState<E>,
    block: &BeaconBlockHeader,
    spec: &ChainSpec,
) -> Result<BeaconState<E>, Error> {
    process_block_header(state, block, &SeededProposerSelector, spec)
}

/// Validates each of `blocks` against the same `state`, in parallel.
///
/// The results are independent of one another and are returned in the order of `blocks`.
pub fn process_candidate_headers<E: EthSpec, S: ProposerSelector + Sync>(
    state: &BeaconState<E>,
    blocks: &[BeaconBlockHeader],
    selector: &S,
    spec: &ChainSpec,
) -> Vec<Result<BeaconState<E>, Error>> {
    blocks
        .par_iter()
        .map(|block| process_block_header(state, block, selector, spec))
        .collect()
}
