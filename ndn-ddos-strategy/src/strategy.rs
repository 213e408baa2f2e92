//! The strategy itself: the sans-IO entry points a host forwarder drives (§1, §5).
//!
//! There are exactly three: Interest arrival, NACK arrival, and timer fire. Each runs to
//! completion and returns a batch of [`Command`]s for the host to execute; none of them touches a
//! socket or blocks.

use crate::clock::RevertTimer;
use crate::collaborators::{Faces, Fib, Pit};
use crate::command::Command;
use crate::config::StrategyConfig;
use crate::errors::DdosError;
use crate::face::FaceId;
use crate::interest::Interest;
use crate::interest_handler;
use crate::metrics::StrategyMetrics;
use crate::nack::Nack;
use crate::nack_handler;
use crate::nack_id::NackIdGenerator;
use crate::record_store::RecordStore;
use crate::state_machine;
use std::collections::VecDeque;
use std::time::Instant;

/// Whether the store currently holds any mitigation record (P2: `state == ATTACK` iff the record
/// store is non-empty). Computed rather than tracked, so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Normal,
    Attack,
}

/// Owns all per-prefix mitigation state for one router and exposes the three entry points the
/// forwarder's event loop calls into.
pub struct Strategy {
    config: StrategyConfig,
    store: RecordStore,
    revert_timer: RevertTimer,
    nack_ids: NackIdGenerator,
    metrics: Option<StrategyMetrics>,
}

impl Strategy {
    pub fn new(config: StrategyConfig) -> Result<Self, DdosError> {
        config.validate()?;

        Ok(Self {
            config,
            store: RecordStore::new(),
            revert_timer: RevertTimer::new(),
            nack_ids: NackIdGenerator::new(),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: StrategyMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> State {
        if self.store.is_empty() {
            State::Normal
        } else {
            State::Attack
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Mints a fresh `NackId` for a caller originating its own DDoS NACK (e.g. a producer-gateway
    /// collaborator detecting overload for the first time, outside this crate's scope).
    pub fn mint_nack_id(&self) -> crate::nack::NackId {
        self.nack_ids.next()
    }

    pub fn handle_interest(
        &mut self,
        in_face: FaceId,
        interest: Interest,
        has_out_record: bool,
        faces: &impl Faces,
    ) -> VecDeque<Command> {
        interest_handler::handle_interest(
            &mut self.store,
            &self.config,
            in_face,
            interest,
            has_out_record,
            faces,
            self.metrics.as_ref(),
        )
    }

    pub fn handle_nack(
        &mut self,
        nack: Nack,
        pit: &mut impl Pit,
        fib: &mut impl Fib,
        faces: &impl Faces,
        now: Instant,
    ) -> VecDeque<Command> {
        nack_handler::handle_nack(
            &mut self.store,
            &self.config,
            &mut self.revert_timer,
            nack,
            pit,
            fib,
            faces,
            now,
            self.metrics.as_ref(),
        )
    }

    /// Fires when the armed revert timer's deadline passes. `rng` drives the Bernoulli rounding
    /// in the rate limiter (§4.4) — pass a seeded RNG in tests for determinism, `&mut rand::rng()`
    /// otherwise.
    pub fn handle_deadline_reached(
        &mut self,
        now: Instant,
        rng: &mut impl rand::Rng,
    ) -> VecDeque<Command> {
        state_machine::run_tick(
            &mut self.store,
            &self.config,
            &mut self.revert_timer,
            &self.nack_ids,
            now,
            rng,
            self.metrics.as_ref(),
        )
    }

    /// Convenience wrapper over [`Strategy::handle_deadline_reached`] using the thread-local RNG.
    pub fn handle_deadline_reached_with_default_rng(&mut self, now: Instant) -> VecDeque<Command> {
        let mut rng = rand::thread_rng();
        self.handle_deadline_reached(now, &mut rng)
    }

    pub fn revert_timer(&self) -> &RevertTimer {
        &self.revert_timer
    }

    pub fn record_count(&self) -> usize {
        self.store.len()
    }
}
