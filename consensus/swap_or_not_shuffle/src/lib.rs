//! Provides the "swap-or-not" index permutation used to pick block proposers.
//!
//! `compute_shuffled_index` computes where a single index lands after shuffling a list of
//! `list_size` elements with some `seed`. Proposer selection only ever needs a handful of
//! positions per slot, so the whole-list variant is not provided.

mod compute_shuffled_index;

pub use compute_shuffled_index::compute_shuffled_index;

type Hash256 = [u8; 32];
