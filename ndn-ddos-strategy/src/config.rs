use crate::errors::DdosError;
use crate::record::RouterRole;
use std::time::Duration;

/// Configuration recognised by the strategy (§6).
///
/// There is no CLI or persisted state in this crate — `ndn-ddos-sim` is where `clap`/env
/// overrides live, one layer up. This struct is the library's own construction-time surface.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Revert/drain period `T`.
    pub tick_interval: Duration,
    /// Initial value for each flavour's revert counter.
    pub default_revert_ticks: f64,
    pub router_role: RouterRole,
    /// Cap on buffered Interests per face; excess is dropped. `None` means unbounded.
    pub max_buffer_per_face: Option<usize>,
}

impl StrategyConfig {
    pub fn new(router_role: RouterRole) -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            default_revert_ticks: 3.0,
            router_role,
            max_buffer_per_face: None,
        }
    }

    pub fn validate(&self) -> Result<(), DdosError> {
        if self.tick_interval.is_zero() {
            return Err(DdosError::ZeroTickInterval);
        }

        if self.default_revert_ticks <= 0.0 {
            return Err(DdosError::NonPositiveRevertTicks(self.default_revert_ticks));
        }

        Ok(())
    }
}
