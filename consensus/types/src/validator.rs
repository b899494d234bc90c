use crate::{test_utils::TestRandom, ChainSpec, Epoch, Hash256, PublicKeyBytes};
use rand::RngCore;
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// Information about a `BeaconChain` validator.
///
/// Only slashing logic outside of this crate mutates a `Validator`; state processing reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    #[serde(with = "serde_utils::quoted_u64")]
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl Validator {
    /// Returns `true` if the validator is considered active at some epoch.
    pub fn is_active_at(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    /// Returns `true` if the validator is considered exited at some epoch.
    pub fn is_exited_at(&self, epoch: Epoch) -> bool {
        self.exit_epoch <= epoch
    }

    /// Returns `true` if the validator is active and not slashed, i.e. may propose a block.
    pub fn is_eligible_proposer_at(&self, epoch: Epoch) -> bool {
        self.is_active_at(epoch) && !self.slashed
    }

    /// Builds a validator that has been active since genesis with the maximum effective balance.
    pub fn active_from_genesis(pubkey: PublicKeyBytes, spec: &ChainSpec) -> Self {
        Self {
            pubkey,
            withdrawal_credentials: Hash256::zero(),
            effective_balance: spec.max_effective_balance,
            slashed: false,
            activation_eligibility_epoch: Epoch::new(0),
            activation_epoch: Epoch::new(0),
            exit_epoch: spec.far_future_epoch,
            withdrawable_epoch: spec.far_future_epoch,
        }
    }
}

impl Default for Validator {
    /// Yields a "default" `Validator`. Primarily used for testing.
    fn default() -> Self {
        Self {
            pubkey: PublicKeyBytes::default(),
            withdrawal_credentials: Hash256::default(),
            activation_eligibility_epoch: Epoch::from(u64::MAX),
            activation_epoch: Epoch::from(u64::MAX),
            exit_epoch: Epoch::from(u64::MAX),
            withdrawable_epoch: Epoch::from(u64::MAX),
            slashed: false,
            effective_balance: u64::MAX,
        }
    }
}

impl TestRandom for Validator {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        Self {
            pubkey: PublicKeyBytes::random_for_test(rng),
            withdrawal_credentials: Hash256::random_for_test(rng),
            effective_balance: u64::random_for_test(rng),
            slashed: bool::random_for_test(rng),
            activation_eligibility_epoch: Epoch::random_for_test(rng),
            activation_epoch: Epoch::random_for_test(rng),
            exit_epoch: Epoch::random_for_test(rng),
            withdrawable_epoch: Epoch::random_for_test(rng),
        }
    }
}
