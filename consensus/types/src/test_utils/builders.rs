mod testing_beacon_block_header_builder;
mod testing_beacon_state_builder;

pub use testing_beacon_block_header_builder::TestingBeaconBlockHeaderBuilder;
pub use testing_beacon_state_builder::TestingBeaconStateBuilder;
