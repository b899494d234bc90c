use state_processing::{
    BlockProcessingError, ProposerSelectionError, SlotProcessingError, StateAdvanceError,
};
use types::Slot;

#[derive(Debug, PartialEq)]
pub enum Error {
    SlotProcessingError(SlotProcessingError),
    StateAdvanceError(StateAdvanceError),
    /// The advance would skip more slots than `ProcessorConfig::max_skip_slots` allows.
    TooManySkipSlots {
        state_slot: Slot,
        target_slot: Slot,
        max_skip_slots: u64,
    },
    ProposerSelectionError(ProposerSelectionError),
    BlockProcessingError(BlockProcessingError),
    UnableToBuildLogger(String),
}

macro_rules! easy_from_to {
    ($from: ident, $to: ident) => {
        impl From<$from> for $to {
            fn from(e: $from) -> $to {
                $to::$from(e)
            }
        }
    };
}

easy_from_to!(SlotProcessingError, Error);
easy_from_to!(StateAdvanceError, Error);
easy_from_to!(ProposerSelectionError, Error);
easy_from_to!(BlockProcessingError, Error);
