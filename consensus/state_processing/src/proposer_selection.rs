//! Strategies for choosing which validator may propose the block at `state.slot`.
use safe_arith::SafeArith;
use serde::{Deserialize, Serialize};
use types::{BeaconState, BeaconStateError, ChainSpec, EthSpec, Slot};

#[derive(Debug, PartialEq, Clone)]
pub enum ProposerSelectionError {
    /// The registry is empty, or none of its validators are active. No proposer can exist.
    EmptyRegistry,
    /// A proposer was requested for a slot outside of the state's current epoch.
    SlotOutOfBounds,
    BeaconStateError(BeaconStateError),
}

impl From<BeaconStateError> for ProposerSelectionError {
    fn from(e: BeaconStateError) -> Self {
        match e {
            BeaconStateError::InsufficientValidators => ProposerSelectionError::EmptyRegistry,
            BeaconStateError::SlotOutOfBounds => ProposerSelectionError::SlotOutOfBounds,
            e => ProposerSelectionError::BeaconStateError(e),
        }
    }
}

/// Chooses the proposer for `state.slot`.
///
/// Implementations must be deterministic: the same state and spec always yield the same index,
/// and that index is always a valid position in `state.validators()`.
pub trait ProposerSelector {
    fn select_proposer<E: EthSpec>(
        &self,
        state: &BeaconState<E>,
        spec: &ChainSpec,
    ) -> Result<usize, ProposerSelectionError>;
}

/// Balance-weighted selection over a swap-or-not shuffle of the active validators, seeded from
/// the state's randao mixes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeededProposerSelector;

impl SeededProposerSelector {
    pub fn proposer_at_slot<E: EthSpec>(
        &self,
        state: &BeaconState<E>,
        slot: Slot,
        spec: &ChainSpec,
    ) -> Result<usize, ProposerSelectionError> {
        Ok(state.get_beacon_proposer_index(slot, spec)?)
    }
}

impl ProposerSelector for SeededProposerSelector {
    fn select_proposer<E: EthSpec>(
        &self,
        state: &BeaconState<E>,
        spec: &ChainSpec,
    ) -> Result<usize, ProposerSelectionError> {
        self.proposer_at_slot(state, state.slot, spec)
    }
}

/// Rotates through the active validators in registry order, one per slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundRobinProposerSelector;

impl RoundRobinProposerSelector {
    pub fn proposer_at_slot<E: EthSpec>(
        &self,
        state: &BeaconState<E>,
        slot: Slot,
    ) -> Result<usize, ProposerSelectionError> {
        let epoch = slot.epoch(E::slots_per_epoch());
        if epoch != state.current_epoch() {
            return Err(ProposerSelectionError::SlotOutOfBounds);
        }

        let indices = state.get_active_validator_indices(epoch);
        if indices.is_empty() {
            return Err(ProposerSelectionError::EmptyRegistry);
        }

        let position = slot
            .as_u64()
            .safe_rem(indices.len() as u64)
            .map_err(BeaconStateError::ArithError)? as usize;
        indices
            .get(position)
            .copied()
            .ok_or(ProposerSelectionError::BeaconStateError(
                BeaconStateError::ShuffleIndexOutOfBounds(position),
            ))
    }
}

impl ProposerSelector for RoundRobinProposerSelector {
    fn select_proposer<E: EthSpec>(
        &self,
        state: &BeaconState<E>,
        _spec: &ChainSpec,
    ) -> Result<usize, ProposerSelectionError> {
        self.proposer_at_slot(state, state.slot)
    }
}

/// A runtime choice between the built-in strategies, e.g. as read from a config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposerSelectorKind {
    #[default]
    Seeded,
    RoundRobin,
}

impl ProposerSelector for ProposerSelectorKind {
    fn select_proposer<E: EthSpec>(
        &self,
        state: &BeaconState<E>,
        spec: &ChainSpec,
    ) -> Result<usize, ProposerSelectionError> {
        match self {
            ProposerSelectorKind::Seeded => SeededProposerSelector.select_proposer(state, spec),
            ProposerSelectorKind::RoundRobin => {
                RoundRobinProposerSelector.select_proposer(state, spec)
            }
        }
    }
}
