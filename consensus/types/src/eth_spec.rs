use crate::*;
use serde_derive::{Deserialize, Serialize};
use ssz_types::typenum::{Unsigned, U1099511627776, U32, U64, U65536, U8, U8192};
use std::fmt::Debug;

pub trait EthSpec: 'static + Default + Sync + Send + Clone + Debug + PartialEq + Eq {
    /*
     * Time parameters
     */
    type SlotsPerEpoch: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    type SlotsPerHistoricalRoot: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    /*
     * State list lengths
     */
    type EpochsPerHistoricalVector: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    type ValidatorRegistryLimit: Unsigned + Clone + Sync + Send + Debug + PartialEq;

    fn default_spec() -> ChainSpec;

    fn spec_name() -> EthSpecId;

    /// Returns the `SLOTS_PER_EPOCH` constant for this specification.
    fn slots_per_epoch() -> u64 {
        Self::SlotsPerEpoch::to_u64()
    }

    /// Returns the `SLOTS_PER_HISTORICAL_ROOT` constant for this specification.
    fn slots_per_historical_root() -> usize {
        Self::SlotsPerHistoricalRoot::to_usize()
    }

    /// Returns the `EPOCHS_PER_HISTORICAL_VECTOR` constant for this specification.
    fn epochs_per_historical_vector() -> usize {
        Self::EpochsPerHistoricalVector::to_usize()
    }

    /// Returns the `VALIDATOR_REGISTRY_LIMIT` constant for this specification.
    fn validator_registry_limit() -> usize {
        Self::ValidatorRegistryLimit::to_usize()
    }
}

/// Used to identify one of the `EthSpec` instances defined here.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EthSpecId {
    Mainnet,
    Minimal,
}

/// Ethereum Foundation specifications.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MainnetEthSpec;

impl EthSpec for MainnetEthSpec {
    type SlotsPerEpoch = U32;
    type SlotsPerHistoricalRoot = U8192;
    type EpochsPerHistoricalVector = U65536;
    type ValidatorRegistryLimit = U1099511627776;

    fn default_spec() -> ChainSpec {
        ChainSpec::mainnet()
    }

    fn spec_name() -> EthSpecId {
        EthSpecId::Mainnet
    }
}

/// Ethereum Foundation minimal spec, as defined in the eth2.0-specs repo.
///
/// Short history vectors keep full-state hashing and cloning cheap in tests.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MinimalEthSpec;

impl EthSpec for MinimalEthSpec {
    type SlotsPerEpoch = U8;
    type SlotsPerHistoricalRoot = U64;
    type EpochsPerHistoricalVector = U64;
    type ValidatorRegistryLimit = U1099511627776;

    fn default_spec() -> ChainSpec {
        ChainSpec::minimal()
    }

    fn spec_name() -> EthSpecId {
        EthSpecId::Minimal
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn preset_lengths() {
        assert_eq!(MainnetEthSpec::slots_per_epoch(), 32);
        assert_eq!(MainnetEthSpec::slots_per_historical_root(), 8192);
        assert_eq!(MinimalEthSpec::slots_per_epoch(), 8);
        assert_eq!(MinimalEthSpec::epochs_per_historical_vector(), 64);
        assert_eq!(MinimalEthSpec::validator_registry_limit(), 1 << 40);
    }
}
