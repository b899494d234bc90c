use crate::*;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Each of the signature domains that feed seed generation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Domain {
    BeaconProposer,
}

/// Holds all the runtime "constants" for a beacon chain.
///
/// Lengths of the state vectors are compile-time constants on `EthSpec` instead.
#[derive(PartialEq, Debug, Clone)]
pub struct ChainSpec {
    /*
     * Config name
     */
    pub config_name: Option<String>,

    /*
     * Misc
     */
    pub shuffle_round_count: u8,

    /*
     * Gwei values
     */
    pub max_effective_balance: u64,

    /*
     * Initial Values
     */
    pub genesis_slot: Slot,
    pub far_future_epoch: Epoch,

    /*
     * Time parameters
     */
    pub min_seed_lookahead: Epoch,

    /*
     * Signature domains
     */
    pub domain_beacon_proposer: u32,
}

impl ChainSpec {
    /// Returns the domain constant mixed into seeds for `domain`.
    pub fn get_domain_constant(&self, domain: Domain) -> u32 {
        match domain {
            Domain::BeaconProposer => self.domain_beacon_proposer,
        }
    }

    /// Returns a `ChainSpec` compatible with the Ethereum Foundation specification.
    pub fn mainnet() -> Self {
        Self {
            config_name: Some("mainnet".to_string()),
            shuffle_round_count: 90,
            max_effective_balance: 32_000_000_000,
            genesis_slot: Slot::new(0),
            far_future_epoch: Epoch::new(u64::MAX),
            min_seed_lookahead: Epoch::new(1),
            domain_beacon_proposer: 0,
        }
    }

    /// Ethereum Foundation minimal spec, as defined in the eth2.0-specs repo.
    pub fn minimal() -> Self {
        Self {
            config_name: Some("minimal".to_string()),
            shuffle_round_count: 10,
            ..ChainSpec::mainnet()
        }
    }

    /// Returns a copy of `self` with every value present in `config` applied over it.
    pub fn apply_config(&self, config: &Config) -> Self {
        Self {
            config_name: config.config_name.clone().or_else(|| self.config_name.clone()),
            shuffle_round_count: config
                .shuffle_round_count
                .unwrap_or(self.shuffle_round_count),
            max_effective_balance: config
                .max_effective_balance
                .unwrap_or(self.max_effective_balance),
            genesis_slot: config.genesis_slot.unwrap_or(self.genesis_slot),
            far_future_epoch: self.far_future_epoch,
            min_seed_lookahead: config.min_seed_lookahead.unwrap_or(self.min_seed_lookahead),
            domain_beacon_proposer: config
                .domain_beacon_proposer
                .unwrap_or(self.domain_beacon_proposer),
        }
    }

    /// Builds the spec for `E`, overriding the preset values with those in `config`.
    pub fn from_config<E: EthSpec>(config: &Config) -> Result<Self, String> {
        if let Some(preset_base) = config.preset_base {
            if preset_base != E::spec_name() {
                return Err(format!(
                    "config preset {:?} does not match the compiled preset {:?}",
                    preset_base,
                    E::spec_name()
                ));
            }
        }

        Ok(E::default_spec().apply_config(config))
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// YAML representation of the runtime constants in `ChainSpec`.
///
/// Every field is optional, missing fields keep the value of the preset. Unknown keys are
/// ignored so a full network config file can be supplied.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_base: Option<EthSpecId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_round_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_effective_balance: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_slot: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_seed_lookahead: Option<Epoch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_beacon_proposer: Option<u32>,
}

impl Config {
    /// Extracts every overridable value from `spec`.
    pub fn from_chain_spec<E: EthSpec>(spec: &ChainSpec) -> Self {
        Self {
            config_name: spec.config_name.clone(),
            preset_base: Some(E::spec_name()),
            shuffle_round_count: Some(spec.shuffle_round_count),
            max_effective_balance: Some(spec.max_effective_balance),
            genesis_slot: Some(spec.genesis_slot),
            min_seed_lookahead: Some(spec.min_seed_lookahead),
            domain_beacon_proposer: Some(spec.domain_beacon_proposer),
        }
    }

    pub fn from_file(filename: &Path) -> Result<Self, String> {
        let f = File::open(filename)
            .map_err(|e| format!("Error opening spec at {}: {:?}", filename.display(), e))?;
        serde_yaml::from_reader(f)
            .map_err(|e| format!("Error parsing spec at {}: {:?}", filename.display(), e))
    }
}
