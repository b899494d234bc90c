#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;

mod errors;
mod metrics;
mod processor_config;
#[cfg(test)]
mod tests;

pub use errors::Error;
pub use processor_config::{ProcessorConfig, DEFAULT_MAX_SKIP_SLOTS};

use slog::{crit, debug, Logger};
use state_processing::{
    complete_state_advance, per_slot_processing, process_block_header, process_candidate_headers,
    BlockProcessingError, ProposerSelector, ProposerSelectorKind,
};
use std::marker::PhantomData;
use types::{BeaconBlockHeader, BeaconState, ChainSpec, EthSpec, Hash256, Slot};

/// Advances chain state slot by slot and validates candidate block headers against it, logging
/// and recording metrics along the way.
///
/// Every method takes the state by reference or value and returns a new state; the processor
/// itself holds no chain state.
pub struct HeaderProcessor<E: EthSpec, S: ProposerSelector = ProposerSelectorKind> {
    spec: ChainSpec,
    selector: S,
    config: ProcessorConfig,
    log: Logger,
    _phantom: PhantomData<E>,
}

impl<E: EthSpec> HeaderProcessor<E, ProposerSelectorKind> {
    /// Builds a processor using the selector and logger described by `config`.
    pub fn from_config(spec: ChainSpec, config: ProcessorConfig) -> Result<Self, Error> {
        let log = logging::build_logger(&config.logger).map_err(Error::UnableToBuildLogger)?;
        let selector = config.proposer_selection;
        Ok(Self::new(spec, selector, config, log))
    }
}

impl<E: EthSpec, S: ProposerSelector + Sync> HeaderProcessor<E, S> {
    pub fn new(spec: ChainSpec, selector: S, config: ProcessorConfig, log: Logger) -> Self {
        Self {
            spec,
            selector,
            config,
            log,
            _phantom: PhantomData,
        }
    }

    pub fn spec(&self) -> &ChainSpec {
        &self.spec
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Advance `state` by exactly one slot.
    ///
    /// `state_root` may be supplied if the root of `state` is already known.
    pub fn advance_slot(
        &self,
        state: BeaconState<E>,
        state_root: Option<Hash256>,
    ) -> Result<BeaconState<E>, Error> {
        let timer = metrics::start_timer(&metrics::SLOT_PROCESSING_TIMES);
        let state = per_slot_processing(state, state_root)?;
        metrics::stop_timer(timer);
        metrics::inc_counter(&metrics::SLOTS_ADVANCED);

        debug!(
            self.log,
            "Advanced state";
            "slot" => state.slot.as_u64(),
            "epoch" => state.current_epoch().as_u64(),
        );

        Ok(state)
    }

    /// Advance `state` through skip slots until it reaches `target_slot`.
    ///
    /// Refuses to skip more than `max_skip_slots` slots, if configured.
    pub fn advance_to_slot(
        &self,
        state: BeaconState<E>,
        state_root: Option<Hash256>,
        target_slot: Slot,
    ) -> Result<BeaconState<E>, Error> {
        let state_slot = state.slot;

        if let Some(max_skip_slots) = self.config.max_skip_slots {
            if target_slot > state_slot + max_skip_slots {
                metrics::inc_counter(&metrics::SKIP_SLOT_LIMIT_EXCEEDED);
                debug!(
                    self.log,
                    "Refusing to skip slots";
                    "state_slot" => state_slot.as_u64(),
                    "target_slot" => target_slot.as_u64(),
                    "max_skip_slots" => max_skip_slots,
                );
                return Err(Error::TooManySkipSlots {
                    state_slot,
                    target_slot,
                    max_skip_slots,
                });
            }
        }

        let timer = metrics::start_timer(&metrics::SLOT_PROCESSING_TIMES);
        let state = complete_state_advance(state, state_root, target_slot)?;
        metrics::stop_timer(timer);
        metrics::inc_counter_by(
            &metrics::SLOTS_ADVANCED,
            target_slot.as_u64().saturating_sub(state_slot.as_u64()),
        );

        debug!(
            self.log,
            "Advanced state through skip slots";
            "from" => state_slot.as_u64(),
            "to" => state.slot.as_u64(),
        );

        Ok(state)
    }

    /// Returns the index of the validator permitted to propose at `state.slot`.
    pub fn select_proposer(&self, state: &BeaconState<E>) -> Result<usize, Error> {
        Ok(self.selector.select_proposer(state, &self.spec)?)
    }

    /// Validate `block` against `state`, returning the state with `block` applied as the latest
    /// block header.
    pub fn process_block_header(
        &self,
        state: &BeaconState<E>,
        block: &BeaconBlockHeader,
    ) -> Result<BeaconState<E>, BlockProcessingError> {
        metrics::inc_counter(&metrics::HEADER_PROCESSING_REQUESTS);
        let timer = metrics::start_timer(&metrics::HEADER_PROCESSING_TIMES);

        let result = process_block_header(state, block, &self.selector, &self.spec);

        metrics::stop_timer(timer);
        self.record_outcome(block, &result);

        result
    }

    /// Validate each of the sibling `blocks` against the same `state`.
    ///
    /// Results are returned in the order of `blocks`.
    pub fn process_candidates(
        &self,
        state: &BeaconState<E>,
        blocks: &[BeaconBlockHeader],
    ) -> Vec<Result<BeaconState<E>, BlockProcessingError>> {
        metrics::observe(&metrics::CANDIDATES_PER_BATCH, blocks.len() as f64);

        let results = if self.config.parallel_candidates {
            process_candidate_headers(state, blocks, &self.selector, &self.spec)
        } else {
            blocks
                .iter()
                .map(|block| process_block_header(state, block, &self.selector, &self.spec))
                .collect()
        };

        for (block, result) in blocks.iter().zip(results.iter()) {
            metrics::inc_counter(&metrics::HEADER_PROCESSING_REQUESTS);
            self.record_outcome(block, result);
        }

        debug!(
            self.log,
            "Processed candidate headers";
            "slot" => state.slot.as_u64(),
            "candidates" => blocks.len(),
            "valid" => results.iter().filter(|result| result.is_ok()).count(),
        );

        results
    }

    fn record_outcome(
        &self,
        block: &BeaconBlockHeader,
        result: &Result<BeaconState<E>, BlockProcessingError>,
    ) {
        match result {
            Ok(_) => {
                metrics::inc_counter(&metrics::HEADER_PROCESSING_SUCCESSES);
                debug!(
                    self.log,
                    "Block header accepted";
                    "slot" => block.slot.as_u64(),
                    "parent_root" => ?block.parent_root,
                );
            }
            Err(e) if e.is_fatal() => {
                metrics::inc_counter(&metrics::HEADER_PROCESSING_FATAL);
                if *e == BlockProcessingError::EmptyRegistry {
                    crit!(
                        self.log,
                        "No active validators to propose";
                        "slot" => block.slot.as_u64(),
                    );
                } else {
                    crit!(
                        self.log,
                        "Unable to process block header";
                        "slot" => block.slot.as_u64(),
                        "error" => ?e,
                    );
                }
            }
            Err(e) => {
                metrics::inc_counter(&metrics::HEADER_PROCESSING_INVALID);
                debug!(
                    self.log,
                    "Block header rejected";
                    "slot" => block.slot.as_u64(),
                    "parent_root" => ?block.parent_root,
                    "reason" => ?e,
                );
            }
        }
    }
}
