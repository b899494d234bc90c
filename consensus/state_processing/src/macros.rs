/// Returns `Err(HeaderInvalid)` wrapped in a `BlockProcessingError` if `$condition` is false.
macro_rules! verify {
    ($condition: expr, $result: expr) => {
        if !$condition {
            return Err(crate::per_block_processing::errors::BlockProcessingError::invalid(
                $result,
            ));
        }
    };
}
