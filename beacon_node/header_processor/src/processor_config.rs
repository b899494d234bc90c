use logging::LoggerConfig;
use serde_derive::{Deserialize, Serialize};
use state_processing::ProposerSelectorKind;
use std::fs::File;
use std::path::Path;

pub const DEFAULT_MAX_SKIP_SLOTS: u64 = 10 * 32;

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Maximum number of slots to skip in a single `advance_to_slot`.
    ///
    /// If `None`, there is no limit.
    pub max_skip_slots: Option<u64>,
    /// The strategy used to choose the proposer of each slot.
    pub proposer_selection: ProposerSelectorKind,
    /// Validate sibling candidate headers on the rayon thread pool.
    pub parallel_candidates: bool,
    pub logger: LoggerConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_skip_slots: Some(DEFAULT_MAX_SKIP_SLOTS),
            proposer_selection: ProposerSelectorKind::default(),
            parallel_candidates: true,
            logger: LoggerConfig::default(),
        }
    }
}

impl ProcessorConfig {
    pub fn from_file(filename: &Path) -> Result<Self, String> {
        File::open(filename)
            .map_err(|e| format!("Unable to open {:?}: {:?}", filename, e))
            .and_then(|f| {
                serde_yaml::from_reader(f)
                    .map_err(|e| format!("Unable to parse {:?}: {:?}", filename, e))
            })
    }
}
