use crate::test_utils::TestRandom;
use crate::*;
use ethereum_hashing::hash;
use safe_arith::{ArithError, SafeArith};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::Unsigned;
use swap_or_not_shuffle::compute_shuffled_index;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

mod tests;

const MAX_RANDOM_BYTE: u64 = (1 << 8) - 1;

pub type Validators<E> = VariableList<Validator, <E as EthSpec>::ValidatorRegistryLimit>;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    EpochOutOfBounds,
    SlotOutOfBounds,
    UnknownValidator(usize),
    UnableToShuffle,
    ShuffleIndexOutOfBounds(usize),
    BlockRootsOutOfBounds(usize),
    StateRootsOutOfBounds(usize),
    RandaoMixesOutOfBounds(usize),
    InsufficientValidators,
    TooManyValidators,
    SszTypesError(ssz_types::Error),
    ArithError(ArithError),
}

/// The state of the beacon chain at some slot.
///
/// Only the fields consumed by slot advancement and block header processing are present.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct BeaconState<E>
where
    E: EthSpec,
{
    // Versioning
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_time: u64,
    pub slot: Slot,

    // History
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,

    // Registry
    pub validators: Validators<E>,

    // Randomness
    pub randao_mixes: FixedVector<Hash256, E::EpochsPerHistoricalVector>,
}

/// The name the consensus engine uses for the state snapshot threaded through each slot.
pub type ChainState<E> = BeaconState<E>;

impl<E: EthSpec> BeaconState<E> {
    /// Create a new `BeaconState` at the genesis slot, with an empty registry and zeroed
    /// history.
    pub fn new(genesis_time: u64, spec: &ChainSpec) -> Self {
        BeaconState {
            genesis_time,
            slot: spec.genesis_slot,
            latest_block_header: BeaconBlockHeader {
                slot: spec.genesis_slot,
                ..BeaconBlockHeader::default()
            },
            block_roots: FixedVector::from_elem(Hash256::zero()),
            state_roots: FixedVector::from_elem(Hash256::zero()),
            validators: VariableList::empty(),
            randao_mixes: FixedVector::from_elem(Hash256::zero()),
        }
    }

    /// Returns the `tree_hash_root` of the state.
    pub fn canonical_root(&self) -> Hash256 {
        self.tree_hash_root()
    }

    /// The epoch corresponding to `self.slot`.
    pub fn current_epoch(&self) -> Epoch {
        self.slot.epoch(E::slots_per_epoch())
    }

    /*
     * Validator registry
     */

    pub fn validators(&self) -> &Validators<E> {
        &self.validators
    }

    /// Mutable access to the registry, for slashing logic and test fixtures.
    pub fn validators_mut(&mut self) -> &mut Validators<E> {
        &mut self.validators
    }

    /// Safe indexer for the `validators` list.
    pub fn get_validator(&self, validator_index: usize) -> Result<&Validator, Error> {
        self.validators
            .get(validator_index)
            .ok_or(Error::UnknownValidator(validator_index))
    }

    /// Safe mutator for the `validators` list.
    pub fn get_validator_mut(&mut self, validator_index: usize) -> Result<&mut Validator, Error> {
        self.validators
            .get_mut(validator_index)
            .ok_or(Error::UnknownValidator(validator_index))
    }

    /// Appends `validator` to the registry, returning its index.
    pub fn push_validator(&mut self, validator: Validator) -> Result<usize, Error> {
        let index = self.validators.len();
        self.validators
            .push(validator)
            .map_err(|_| Error::TooManyValidators)?;
        Ok(index)
    }

    /// Return the effective balance for a validator with the given `validator_index`.
    pub fn get_effective_balance(&self, validator_index: usize) -> Result<u64, Error> {
        self.get_validator(validator_index)
            .map(|v| v.effective_balance)
    }

    /// Returns the indices of all validators active at `epoch`, in ascending order.
    ///
    /// Does not utilize any cache; the registry is scanned on every call.
    pub fn get_active_validator_indices(&self, epoch: Epoch) -> Vec<usize> {
        self.validators
            .iter()
            .enumerate()
            .filter_map(|(index, validator)| validator.is_active_at(epoch).then_some(index))
            .collect()
    }

    /*
     * Block and state root history
     */

    /// Safely obtains the index for `block_roots` or `state_roots` given some `slot`.
    ///
    /// Only slots strictly before `self.slot` and within `SLOTS_PER_HISTORICAL_ROOT` of it are
    /// retained.
    fn get_latest_roots_index(&self, slot: Slot) -> Result<usize, Error> {
        if slot < self.slot && self.slot <= slot.safe_add(E::slots_per_historical_root() as u64)? {
            Ok(slot.as_usize().safe_rem(E::slots_per_historical_root())?)
        } else {
            Err(Error::SlotOutOfBounds)
        }
    }

    /// Return the block root at a recent `slot`.
    pub fn get_block_root(&self, slot: Slot) -> Result<&Hash256, Error> {
        let i = self.get_latest_roots_index(slot)?;
        self.block_roots
            .get(i)
            .ok_or(Error::BlockRootsOutOfBounds(i))
    }

    /// Sets the block root for some given slot.
    pub fn set_block_root(&mut self, slot: Slot, block_root: Hash256) -> Result<(), Error> {
        let i = self.get_latest_roots_index(slot)?;
        *self
            .block_roots
            .get_mut(i)
            .ok_or(Error::BlockRootsOutOfBounds(i))? = block_root;
        Ok(())
    }

    /// Gets the state root for some slot.
    pub fn get_state_root(&self, slot: Slot) -> Result<&Hash256, Error> {
        let i = self.get_latest_roots_index(slot)?;
        self.state_roots
            .get(i)
            .ok_or(Error::StateRootsOutOfBounds(i))
    }

    /// Sets the latest state root for slot.
    pub fn set_state_root(&mut self, slot: Slot, state_root: Hash256) -> Result<(), Error> {
        let i = self.get_latest_roots_index(slot)?;
        *self
            .state_roots
            .get_mut(i)
            .ok_or(Error::StateRootsOutOfBounds(i))? = state_root;
        Ok(())
    }

    /*
     * Randomness
     */

    /// Safely obtains the index for `randao_mixes`.
    ///
    /// Mixes are retained for `EPOCHS_PER_HISTORICAL_VECTOR` epochs up to and including the
    /// current epoch.
    fn get_randao_mix_index(&self, epoch: Epoch) -> Result<usize, Error> {
        let current_epoch = self.current_epoch();
        let len = E::EpochsPerHistoricalVector::to_u64();

        if current_epoch < epoch.safe_add(len)? && epoch <= current_epoch {
            Ok(epoch.as_usize().safe_rem(len as usize)?)
        } else {
            Err(Error::EpochOutOfBounds)
        }
    }

    /// Return the randao mix at a recent `epoch`.
    pub fn get_randao_mix(&self, epoch: Epoch) -> Result<&Hash256, Error> {
        let i = self.get_randao_mix_index(epoch)?;
        self.randao_mixes
            .get(i)
            .ok_or(Error::RandaoMixesOutOfBounds(i))
    }

    /// Set the randao mix at a recent `epoch`.
    pub fn set_randao_mix(&mut self, epoch: Epoch, mix: Hash256) -> Result<(), Error> {
        let i = self.get_randao_mix_index(epoch)?;
        *self
            .randao_mixes
            .get_mut(i)
            .ok_or(Error::RandaoMixesOutOfBounds(i))? = mix;
        Ok(())
    }

    /// Generate a seed for the given `epoch`.
    pub fn get_seed(
        &self,
        epoch: Epoch,
        domain_type: Domain,
        spec: &ChainSpec,
    ) -> Result<Hash256, Error> {
        // Bypass the safe getter for RANDAO so we can gracefully handle the scenario where `epoch
        // == 0`.
        let mix = {
            let i = epoch
                .safe_add(E::EpochsPerHistoricalVector::to_u64())?
                .safe_sub(spec.min_seed_lookahead)?
                .safe_sub(1)?;
            let i_mod = i.as_usize().safe_rem(self.randao_mixes.len())?;
            self.randao_mixes
                .get(i_mod)
                .ok_or(Error::RandaoMixesOutOfBounds(i_mod))?
        };
        let domain_bytes = spec.get_domain_constant(domain_type).to_le_bytes();
        let epoch_bytes = epoch.as_u64().to_le_bytes();

        const NUM_DOMAIN_BYTES: usize = 4;
        const NUM_EPOCH_BYTES: usize = 8;
        const MIX_OFFSET: usize = NUM_DOMAIN_BYTES + NUM_EPOCH_BYTES;
        const NUM_MIX_BYTES: usize = 32;

        let mut preimage = [0; NUM_DOMAIN_BYTES + NUM_EPOCH_BYTES + NUM_MIX_BYTES];
        preimage[0..NUM_DOMAIN_BYTES].copy_from_slice(&domain_bytes);
        preimage[NUM_DOMAIN_BYTES..MIX_OFFSET].copy_from_slice(&epoch_bytes);
        preimage[MIX_OFFSET..].copy_from_slice(mix.as_bytes());

        Ok(Hash256::from_slice(&hash(&preimage)))
    }

    /*
     * Proposer selection
     */

    /// Compute the seed to use for the beacon proposer selection at the given `slot`.
    pub fn get_beacon_proposer_seed(&self, slot: Slot, spec: &ChainSpec) -> Result<Vec<u8>, Error> {
        let epoch = slot.epoch(E::slots_per_epoch());
        let mut preimage = self
            .get_seed(epoch, Domain::BeaconProposer, spec)?
            .as_bytes()
            .to_vec();
        preimage.extend_from_slice(&slot.as_u64().to_le_bytes());
        Ok(hash(&preimage))
    }

    /// Returns the beacon proposer index for the `slot` in `self.current_epoch()`.
    ///
    /// Proposer indices are only known for the current epoch, since they depend on the effective
    /// balances of the validators active in it.
    ///
    /// ## Errors
    ///
    /// - `SlotOutOfBounds` if `slot` is not in the current epoch.
    /// - `InsufficientValidators` if there is no active validator in the current epoch.
    pub fn get_beacon_proposer_index(&self, slot: Slot, spec: &ChainSpec) -> Result<usize, Error> {
        let epoch = slot.epoch(E::slots_per_epoch());
        if epoch != self.current_epoch() {
            return Err(Error::SlotOutOfBounds);
        }

        let seed = self.get_beacon_proposer_seed(slot, spec)?;
        let indices = self.get_active_validator_indices(epoch);

        self.compute_proposer_index(&indices, &seed, spec)
    }

    /// Returns the beacon proposer index for each slot in `self.current_epoch()`.
    ///
    /// The returned `Vec` contains one proposer index for each slot, starting at the first slot
    /// of the epoch.
    pub fn get_beacon_proposer_indices(&self, spec: &ChainSpec) -> Result<Vec<usize>, Error> {
        let epoch = self.current_epoch();
        let indices = self.get_active_validator_indices(epoch);
        let start_slot = epoch.start_slot(E::slots_per_epoch());

        (0..E::slots_per_epoch())
            .map(|offset| {
                let seed = self.get_beacon_proposer_seed(start_slot.safe_add(offset)?, spec)?;
                self.compute_proposer_index(&indices, &seed, spec)
            })
            .collect()
    }

    /// Compute the proposer (not necessarily for the Beacon chain) from a list of indices.
    ///
    /// Candidates are drawn in shuffled order and accepted with probability proportional to
    /// their effective balance.
    pub fn compute_proposer_index(
        &self,
        indices: &[usize],
        seed: &[u8],
        spec: &ChainSpec,
    ) -> Result<usize, Error> {
        if indices.is_empty() {
            return Err(Error::InsufficientValidators);
        }

        let mut i = 0;
        loop {
            let shuffled_index = compute_shuffled_index(
                i.safe_rem(indices.len())?,
                indices.len(),
                seed,
                spec.shuffle_round_count,
            )
            .ok_or(Error::UnableToShuffle)?;
            let candidate_index = *indices
                .get(shuffled_index)
                .ok_or(Error::ShuffleIndexOutOfBounds(shuffled_index))?;
            let random_byte = Self::shuffling_random_byte(i, seed)?;
            let effective_balance = self.get_effective_balance(candidate_index)?;
            if effective_balance.safe_mul(MAX_RANDOM_BYTE)?
                >= spec
                    .max_effective_balance
                    .safe_mul(u64::from(random_byte))?
            {
                return Ok(candidate_index);
            }
            i.safe_add_assign(1)?;
        }
    }

    /// Get a random byte from the given `seed`.
    fn shuffling_random_byte(i: usize, seed: &[u8]) -> Result<u8, Error> {
        let mut preimage = seed.to_vec();
        preimage.extend_from_slice(&(i.safe_div(32)? as u64).to_le_bytes());
        let index = i.safe_rem(32)?;
        hash(&preimage)
            .get(index)
            .copied()
            .ok_or(Error::ShuffleIndexOutOfBounds(index))
    }
}

impl From<ssz_types::Error> for Error {
    fn from(e: ssz_types::Error) -> Error {
        Error::SszTypesError(e)
    }
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Error {
        Error::ArithError(e)
    }
}

impl<E: EthSpec> TestRandom for BeaconState<E> {
    fn random_for_test(rng: &mut impl rand::RngCore) -> Self {
        Self {
            genesis_time: u64::random_for_test(rng),
            slot: Slot::random_for_test(rng),
            latest_block_header: BeaconBlockHeader::random_for_test(rng),
            block_roots: FixedVector::random_for_test(rng),
            state_roots: FixedVector::random_for_test(rng),
            validators: VariableList::random_for_test(rng),
            randao_mixes: FixedVector::random_for_test(rng),
        }
    }
}
