//! Ethereum 2.0 types consumed by slot advancement and block header processing.

// Required for big type-level numbers
#![recursion_limit = "128"]

#[macro_use]
mod slot_epoch_macros;

extern crate serde_utils;

pub mod beacon_block_header;
pub mod beacon_state;
pub mod chain_spec;
pub mod eth_spec;
pub mod slot_epoch;
pub mod test_utils;
pub mod validator;

pub use crate::beacon_block_header::BeaconBlockHeader;
pub use crate::beacon_state::{BeaconState, ChainState, Error as BeaconStateError, Validators};
pub use crate::chain_spec::{ChainSpec, Config, Domain};
pub use crate::eth_spec::*;
pub use crate::slot_epoch::{Epoch, Slot};
pub use crate::validator::Validator;

pub type Hash256 = ethereum_types::H256;
pub type PublicKeyBytes = FixedVector<u8, ssz_types::typenum::U48>;
pub type SignatureBytes = VariableList<u8, ssz_types::typenum::U96>;

pub use ssz_types::{typenum, typenum::Unsigned, FixedVector, VariableList};
