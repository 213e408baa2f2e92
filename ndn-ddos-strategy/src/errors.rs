/// Errors a caller legitimately needs to match on.
///
/// Per §7 of the governing design ("nothing here is fatal"), the strategy's three entry points —
/// Interest arrival, NACK arrival, timer fire — never return `Result`: malformed input is logged
/// and contained within that one callback. This type exists only for the one place a caller does
/// need to branch, construction-time configuration validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DdosError {
    #[error("tick_interval must be greater than zero")]
    ZeroTickInterval,
    #[error("default_revert_ticks must be positive, got {0}")]
    NonPositiveRevertTicks(f64),
}
