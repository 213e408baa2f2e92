//! Per-face token budgeting and buffered-Interest draining, run once per revert tick at the
//! consumer gateway (§4.4).

use crate::command::Command;
use crate::face::FaceId;
use crate::metrics::StrategyMetrics;
use crate::record::FlavourState;
use crate::record_store::RecordStore;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

/// Drains every record's per-face buffers, forwarding up to each face's computed token budget and
/// dropping the rest. Returns the forwarding commands for the host to execute.
pub fn drain_buffers<R: Rng>(
    store: &mut RecordStore,
    tick_interval: Duration,
    rng: &mut R,
    metrics: Option<&StrategyMetrics>,
) -> VecDeque<Command> {
    let tick_interval_secs = tick_interval.as_secs_f64();
    let mut commands = VecDeque::new();

    for (prefix, record) in store.iter_mut() {
        for (face, buffer) in record.per_face_interest_buffer.iter_mut() {
            let limit_fake = token_limit(&mut record.fake, *face, tick_interval_secs, buffer.len(), rng);
            let limit_valid = token_limit(&mut record.valid, *face, tick_interval_secs, buffer.len(), rng);

            // Ties between two flavours both permitting this face are broken by the minimum
            // (conservative); a sentinel stands in for a flavour that doesn't constrain this face
            // at all (§4.4).
            let final_limit = match (limit_fake, limit_valid) {
                (None, None) => buffer.len() as u64,
                (Some(f), None) => f,
                (None, Some(v)) => v,
                (Some(f), Some(v)) => f.min(v),
            };

            let to_forward = buffer.len().min(final_limit as usize);
            for _ in 0..to_forward {
                if let Some(interest) = buffer.pop_front() {
                    commands.push_back(Command::ForwardLoadBalance {
                        in_face: *face,
                        interest,
                    });
                }
            }

            let dropped = buffer.len();
            // Explicit admission control: the remainder is dropped, not carried to the next tick.
            buffer.clear();

            if let Some(metrics) = metrics {
                metrics.interest_forwarded(to_forward as u64);
                if dropped > 0 {
                    metrics.interests_dropped(dropped as u64);
                }
            }

            tracing::info!(
                %prefix,
                face = %face,
                forwarded = to_forward,
                dropped,
                "drained buffered Interests"
            );
        }
    }

    commands
}

/// Computes `i + Bernoulli(φ)` for one flavour's contribution to a face's token budget, flagging
/// the face bad if its backlog exceeds the computed limit. Returns `None` when the flavour is
/// inactive or carries no weight for this face (i.e. does not constrain it).
fn token_limit<R: Rng>(
    flavour: &mut FlavourState,
    face: FaceId,
    tick_interval_secs: f64,
    buffer_len: usize,
    rng: &mut R,
) -> Option<u64> {
    if !flavour.active {
        return None;
    }

    let weight = *flavour.pushback_weight.get(&face)?;
    let rate = weight * flavour.budget as f64 * tick_interval_secs;
    let whole = rate.floor();
    let fractional = (rate - whole).clamp(0.0, 1.0);
    let bump = fractional > 0.0 && rng.gen_bool(fractional);
    let limit = whole as u64 + u64::from(bump);

    // Re-evaluated every tick (not a one-way latch): a face stays good through ticks where its
    // backlog never exceeded the budget, and recovers on the first clean tick after an overrun
    // (§8 S5: "an additional 3 ticks with no buffer overruns" makes a previously-bad face good).
    let within_budget = buffer_len <= limit as usize + 1;
    flavour.is_good_consumer.insert(face, within_budget);

    Some(limit)
}
