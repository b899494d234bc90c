// Clippy lint set-up
#![cfg_attr(
    not(test),
    deny(
        clippy::arithmetic_side_effects,
        clippy::disallowed_methods,
        clippy::indexing_slicing,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::let_underscore_must_use
    )
)]

#[macro_use]
mod macros;

pub mod per_block_processing;
pub mod per_slot_processing;
pub mod proposer_selection;
pub mod state_advance;

pub use per_block_processing::{
    errors::{BlockProcessingError, HeaderInvalid},
    process_block_header, process_block_header_default, process_candidate_headers,
};
pub use per_slot_processing::{per_slot_processing, Error as SlotProcessingError};
pub use proposer_selection::{
    ProposerSelectionError, ProposerSelector, ProposerSelectorKind, RoundRobinProposerSelector,
    SeededProposerSelector,
};
pub use state_advance::{complete_state_advance, Error as StateAdvanceError};
