use crate::proposer_selection::ProposerSelectionError;
use types::{BeaconStateError, Hash256, Slot};

/// The error returned from `process_block_header`.
///
/// Any error leaves the input state untouched.
#[derive(Debug, PartialEq, Clone)]
pub enum BlockProcessingError {
    /// The header failed a validity rule and should be rejected.
    HeaderInvalid { reason: HeaderInvalid },
    /// There is no active validator to propose. The chain is misconfigured.
    EmptyRegistry,
    BeaconStateError(BeaconStateError),
}

impl BlockProcessingError {
    pub fn invalid(reason: HeaderInvalid) -> Self {
        BlockProcessingError::HeaderInvalid { reason }
    }

    /// Returns `true` if the error reflects a fault in the state or the registry rather than in
    /// the candidate header.
    pub fn is_fatal(&self) -> bool {
        match self {
            BlockProcessingError::HeaderInvalid { .. } => false,
            BlockProcessingError::EmptyRegistry | BlockProcessingError::BeaconStateError(_) => true,
        }
    }
}

impl From<BeaconStateError> for BlockProcessingError {
    fn from(e: BeaconStateError) -> Self {
        BlockProcessingError::BeaconStateError(e)
    }
}

impl From<ProposerSelectionError> for BlockProcessingError {
    fn from(e: ProposerSelectionError) -> Self {
        match e {
            ProposerSelectionError::EmptyRegistry => BlockProcessingError::EmptyRegistry,
            ProposerSelectionError::SlotOutOfBounds => {
                BlockProcessingError::BeaconStateError(BeaconStateError::SlotOutOfBounds)
            }
            ProposerSelectionError::BeaconStateError(e) => BlockProcessingError::BeaconStateError(e),
        }
    }
}

impl From<HeaderInvalid> for BlockProcessingError {
    fn from(reason: HeaderInvalid) -> Self {
        BlockProcessingError::invalid(reason)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum HeaderInvalid {
    StateSlotMismatch { state: Slot, block: Slot },
    ParentBlockRootMismatch { state: Hash256, block: Hash256 },
    ProposerSlashed(usize),
}
