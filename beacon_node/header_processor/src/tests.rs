use crate::metrics;
use crate::*;
use logging::test_logger;
use state_processing::{HeaderInvalid, RoundRobinProposerSelector, SeededProposerSelector};
use types::test_utils::{TestingBeaconBlockHeaderBuilder, TestingBeaconStateBuilder};
use types::MinimalEthSpec;

type E = MinimalEthSpec;

pub const VALIDATOR_COUNT: usize = 16;

fn get_processor(config: ProcessorConfig) -> HeaderProcessor<E> {
    let spec = E::default_spec();
    let selector = config.proposer_selection;
    HeaderProcessor::new(spec, selector, config, test_logger())
}

fn genesis_state() -> BeaconState<E> {
    TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &E::default_spec()).build()
}

fn counter_value(counter: &prometheus::Result<prometheus::IntCounter>) -> u64 {
    counter.as_ref().map(|c| c.get()).unwrap_or(0)
}

#[test]
fn advance_slot_increments() {
    let processor = get_processor(ProcessorConfig::default());

    let state = processor.advance_slot(genesis_state(), None).unwrap();
    let state = processor.advance_slot(state, None).unwrap();

    assert_eq!(state.slot, Slot::new(2));
}

#[test]
fn advance_to_slot_within_limit() {
    let processor = get_processor(ProcessorConfig {
        max_skip_slots: Some(4),
        ..ProcessorConfig::default()
    });

    let state = processor
        .advance_to_slot(genesis_state(), None, Slot::new(4))
        .unwrap();

    assert_eq!(state.slot, Slot::new(4));
}

#[test]
fn advance_to_slot_too_many_skips() {
    let processor = get_processor(ProcessorConfig {
        max_skip_slots: Some(4),
        ..ProcessorConfig::default()
    });
    let before = counter_value(&metrics::SKIP_SLOT_LIMIT_EXCEEDED);

    let result = processor.advance_to_slot(genesis_state(), None, Slot::new(5));

    assert_eq!(
        result,
        Err(Error::TooManySkipSlots {
            state_slot: Slot::new(0),
            target_slot: Slot::new(5),
            max_skip_slots: 4,
        })
    );
    assert!(counter_value(&metrics::SKIP_SLOT_LIMIT_EXCEEDED) > before);
}

#[test]
fn advance_to_slot_unlimited() {
    let processor = get_processor(ProcessorConfig {
        max_skip_slots: None,
        ..ProcessorConfig::default()
    });

    let state = processor
        .advance_to_slot(genesis_state(), None, Slot::new(100))
        .unwrap();

    assert_eq!(state.slot, Slot::new(100));
}

#[test]
fn advance_to_past_slot() {
    let processor = get_processor(ProcessorConfig::default());
    let state = processor
        .advance_to_slot(genesis_state(), None, Slot::new(3))
        .unwrap();

    assert_eq!(
        processor.advance_to_slot(state, None, Slot::new(2)),
        Err(Error::StateAdvanceError(
            state_processing::StateAdvanceError::BadTargetSlot {
                target_slot: Slot::new(2),
                state_slot: Slot::new(3),
            }
        ))
    );
}

#[test]
fn select_proposer_uses_configured_strategy() {
    let state = genesis_state();
    let spec = E::default_spec();

    let seeded = get_processor(ProcessorConfig::default());
    let round_robin = get_processor(ProcessorConfig {
        proposer_selection: ProposerSelectorKind::RoundRobin,
        ..ProcessorConfig::default()
    });

    assert_eq!(
        seeded.select_proposer(&state),
        Ok(SeededProposerSelector.select_proposer(&state, &spec).unwrap())
    );
    assert_eq!(
        round_robin.select_proposer(&state),
        Ok(RoundRobinProposerSelector
            .select_proposer(&state, &spec)
            .unwrap())
    );
}

#[test]
fn select_proposer_empty_registry() {
    let processor = get_processor(ProcessorConfig::default());
    let state = TestingBeaconStateBuilder::<E>::new(0, processor.spec()).build();

    assert_eq!(
        processor.select_proposer(&state),
        Err(Error::ProposerSelectionError(
            state_processing::ProposerSelectionError::EmptyRegistry
        ))
    );
}

#[test]
fn process_valid_header() {
    let processor = get_processor(ProcessorConfig::default());
    let state = processor
        .advance_to_slot(genesis_state(), None, Slot::new(5))
        .unwrap();
    let block = TestingBeaconBlockHeaderBuilder::for_next_slot(&state).build();
    let state = processor.advance_slot(state, None).unwrap();
    let before = counter_value(&metrics::HEADER_PROCESSING_SUCCESSES);

    let new_state = processor.process_block_header(&state, &block).unwrap();

    assert_eq!(new_state.latest_block_header.slot, Slot::new(6));
    assert!(counter_value(&metrics::HEADER_PROCESSING_SUCCESSES) > before);
}

#[test]
fn process_invalid_header() {
    let processor = get_processor(ProcessorConfig::default());
    let state = genesis_state();
    let mut builder = TestingBeaconBlockHeaderBuilder::for_next_slot(&state);
    builder.set_slot(Slot::new(2));
    let block = builder.build();
    let state = processor.advance_slot(state, None).unwrap();
    let before = counter_value(&metrics::HEADER_PROCESSING_INVALID);

    let result = processor.process_block_header(&state, &block);

    assert_eq!(
        result,
        Err(BlockProcessingError::HeaderInvalid {
            reason: HeaderInvalid::StateSlotMismatch {
                state: Slot::new(1),
                block: Slot::new(2),
            }
        })
    );
    assert!(counter_value(&metrics::HEADER_PROCESSING_INVALID) > before);
}

#[test]
fn process_header_with_empty_registry_is_fatal() {
    let processor = get_processor(ProcessorConfig::default());
    let state = TestingBeaconStateBuilder::<E>::new(0, processor.spec()).build();
    let block = TestingBeaconBlockHeaderBuilder::for_next_slot(&state).build();
    let state = processor.advance_slot(state, None).unwrap();
    let before = counter_value(&metrics::HEADER_PROCESSING_FATAL);

    let result = processor.process_block_header(&state, &block);

    assert_eq!(result, Err(BlockProcessingError::EmptyRegistry));
    assert!(counter_value(&metrics::HEADER_PROCESSING_FATAL) > before);
}

#[test]
fn parallel_and_sequential_candidates_agree() {
    let parallel = get_processor(ProcessorConfig::default());
    let sequential = get_processor(ProcessorConfig {
        parallel_candidates: false,
        ..ProcessorConfig::default()
    });

    let state = genesis_state();
    let block = TestingBeaconBlockHeaderBuilder::for_next_slot(&state).build();
    let state = parallel.advance_slot(state, None).unwrap();

    let mut wrong_parent = block.clone();
    wrong_parent.parent_root = Hash256::repeat_byte(0x0a);
    let mut other_body = block.clone();
    other_body.body_root = Hash256::repeat_byte(0x01);
    let blocks = vec![block, wrong_parent, other_body];

    let parallel_results = parallel.process_candidates(&state, &blocks);
    let sequential_results = sequential.process_candidates(&state, &blocks);

    assert_eq!(parallel_results, sequential_results);
    assert_eq!(
        parallel_results
            .iter()
            .map(|result| result.is_ok())
            .collect::<Vec<_>>(),
        vec![true, false, true]
    );
}

#[test]
fn from_config_builds_logger() {
    let config = ProcessorConfig {
        proposer_selection: ProposerSelectorKind::RoundRobin,
        logger: logging::LoggerConfig {
            disabled: true,
            ..logging::LoggerConfig::default()
        },
        ..ProcessorConfig::default()
    };

    let processor = HeaderProcessor::<E>::from_config(E::default_spec(), config.clone()).unwrap();

    assert_eq!(processor.config(), &config);
    assert_eq!(processor.select_proposer(&genesis_state()), Ok(0));
}

#[test]
fn from_config_rejects_bad_log_level() {
    let config = ProcessorConfig {
        logger: logging::LoggerConfig {
            debug_level: "verbose".into(),
            ..logging::LoggerConfig::default()
        },
        ..ProcessorConfig::default()
    };

    assert!(matches!(
        HeaderProcessor::<E>::from_config(E::default_spec(), config),
        Err(Error::UnableToBuildLogger(_))
    ));
}
