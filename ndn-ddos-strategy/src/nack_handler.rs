//! Classifies an incoming DDoS NACK, updates the matching mitigation record, and emits weighted
//! pushback further downstream (§4.1, §4.2).

use crate::clock::RevertTimer;
use crate::collaborators::{Faces, Fib, Pit};
use crate::command::Command;
use crate::config::StrategyConfig;
use crate::face::FaceId;
use crate::metrics::StrategyMetrics;
use crate::nack::{Nack, NackReason};
use crate::name::Name;
use crate::pushback;
use crate::record::{Flavour, RouterRole};
use crate::record_store::RecordStore;
use std::collections::{BTreeSet, VecDeque};
use std::time::Instant;

#[allow(clippy::too_many_arguments)]
pub fn handle_nack(
    store: &mut RecordStore,
    config: &StrategyConfig,
    revert_timer: &mut RevertTimer,
    nack: Nack,
    pit: &mut impl Pit,
    fib: &mut impl Fib,
    faces: &impl Faces,
    now: Instant,
    metrics: Option<&StrategyMetrics>,
) -> VecDeque<Command> {
    if let Some(metrics) = metrics {
        metrics.nack_received(&nack.reason.to_string());
    }

    match nack.reason {
        NackReason::FakeInterest => {
            handle_fake_interest(store, config, revert_timer, nack, pit, faces, now, metrics)
        }
        NackReason::ValidInterestOverload => {
            handle_valid_overload(store, config, revert_timer, nack, pit, faces, now, metrics)
        }
        NackReason::HintChangeNotice => handle_hint_change_notice(store, config, nack, pit, fib),
        NackReason::DdosResetRate => handle_ddos_reset_rate(store, &nack),
        NackReason::Other => {
            tracing::debug!(nack_id = %nack.nack_id, "delegating unrecognised NACK reason");
            VecDeque::new()
        }
    }
}

/// §4.2 upsert. Returns `false` on a duplicate `nack_id` (step 3) — the caller must stop there.
fn upsert(
    store: &mut RecordStore,
    config: &StrategyConfig,
    flavour: Flavour,
    prefix: &Name,
    nack: &Nack,
    now: Instant,
    metrics: Option<&StrategyMetrics>,
) -> bool {
    let existed = store.get(prefix).is_some();
    let record = store.get_or_insert(prefix, config.default_revert_ticks);

    if !existed {
        if let Some(metrics) = metrics {
            metrics.record_created();
        }
    }

    if record.flavour(flavour).last_nack_id == Some(nack.nack_id) {
        return false;
    }

    let was_active = record.flavour(flavour).active;
    let counter_already_expired = was_active && record.flavour(flavour).revert_counter <= 0.0;

    let state = record.flavour_mut(flavour);

    if counter_already_expired {
        // Stale weights discarded (§4.2 step 5) — a new NACK after the revert counter already
        // hit zero starts the weight map over rather than blending against now-obsolete shares.
        state.pushback_weight.clear();
    }

    state.budget = if was_active {
        (state.budget + nack.tolerance) / 2
    } else {
        nack.tolerance
    };
    state.active = true;
    state.last_nack_id = Some(nack.nack_id);
    state.last_nack_ts = Some(now);
    state.revert_counter = config.default_revert_ticks;

    true
}

#[allow(clippy::too_many_arguments)]
fn handle_fake_interest(
    store: &mut RecordStore,
    config: &StrategyConfig,
    revert_timer: &mut RevertTimer,
    nack: Nack,
    pit: &mut impl Pit,
    faces: &impl Faces,
    now: Instant,
    metrics: Option<&StrategyMetrics>,
) -> VecDeque<Command> {
    let prefix = nack.mitigated_prefix();

    if !upsert(store, config, Flavour::Fake, &prefix, &nack, now, metrics) {
        tracing::debug!(%prefix, nack_id = %nack.nack_id, "duplicate FAKE_INTEREST NACK ignored");
        return VecDeque::new();
    }

    let record = store.get_mut(&prefix).expect("just upserted above");
    let pushback = pushback::fake_mode(
        &mut record.fake.pushback_weight,
        &mut record.fake.is_good_consumer,
        &nack.fake_interest_names,
        pit,
        faces,
        config.router_role.is_consumer_gateway(),
    );

    let mut commands = VecDeque::new();
    for (face, weight, names) in pushback {
        let tolerance = (nack.tolerance as f64 * weight).round() as u64;
        let out = Nack {
            reason: NackReason::FakeInterest,
            name: nack.name.clone(),
            prefix_len: nack.prefix_len,
            tolerance,
            nack_id: nack.nack_id,
            fake_interest_names: names,
        };

        if let Some(metrics) = metrics {
            metrics.nack_emitted(&out.reason.to_string());
        }
        tracing::info!(%prefix, face = %face, tolerance, "emitted fake-interest pushback");
        commands.push_back(Command::SendNack { face, nack: out });
    }

    for name in &nack.fake_interest_names {
        pit.ddos_remove(name);
    }

    revert_timer.arm_at_least(now, config.tick_interval);

    commands
}

#[allow(clippy::too_many_arguments)]
fn handle_valid_overload(
    store: &mut RecordStore,
    config: &StrategyConfig,
    revert_timer: &mut RevertTimer,
    nack: Nack,
    pit: &mut impl Pit,
    faces: &impl Faces,
    now: Instant,
    metrics: Option<&StrategyMetrics>,
) -> VecDeque<Command> {
    let prefix = nack.mitigated_prefix();

    if !upsert(store, config, Flavour::Valid, &prefix, &nack, now, metrics) {
        tracing::debug!(%prefix, nack_id = %nack.nack_id, "duplicate VALID_INTEREST_OVERLOAD NACK ignored");
        return VecDeque::new();
    }

    let record = store.get_mut(&prefix).expect("just upserted above");
    let pushback = pushback::valid_mode(
        &mut record.valid.pushback_weight,
        &mut record.valid.is_good_consumer,
        &prefix,
        pit,
        faces,
        config.router_role.is_consumer_gateway(),
    );

    let mut commands = VecDeque::new();
    for (face, weight, names) in pushback {
        let tolerance = (nack.tolerance as f64 * weight).round() as u64;
        let out = Nack {
            reason: NackReason::ValidInterestOverload,
            name: nack.name.clone(),
            prefix_len: nack.prefix_len,
            tolerance,
            nack_id: nack.nack_id,
            fake_interest_names: names,
        };

        if let Some(metrics) = metrics {
            metrics.nack_emitted(&out.reason.to_string());
        }
        tracing::info!(%prefix, face = %face, tolerance, "emitted valid-overload pushback");
        commands.push_back(Command::SendNack { face, nack: out });
    }

    // Valid Interests remain live; only the PIT entries' sending rate is throttled, so we never
    // call `ddos_remove` here (§4.1).
    revert_timer.arm_at_least(now, config.tick_interval);

    commands
}

fn handle_hint_change_notice(
    store: &RecordStore,
    config: &StrategyConfig,
    nack: Nack,
    pit: &mut impl Pit,
    fib: &mut impl Fib,
) -> VecDeque<Command> {
    let entry = pit.find(&nack.name);
    let in_faces: BTreeSet<FaceId> = entry
        .as_ref()
        .map(|e| e.in_records.iter().copied().collect())
        .unwrap_or_default();

    let mut commands = VecDeque::new();

    match config.router_role {
        RouterRole::ProducerGateway => {
            for face in &in_faces {
                commands.push_back(Command::SendNack {
                    face: *face,
                    nack: nack.clone(),
                });
            }

            pit.ddos_remove(&nack.name);

            let prefix = nack.mitigated_prefix();
            fib.erase(&prefix);
            if let Some(new_name) = nack.fake_interest_names.first()
                && !fib.insert(new_name)
            {
                tracing::debug!(%new_name, "FIB insert raced with an existing registration, proceeding");
            }
        }
        RouterRole::Normal => {
            for face in &in_faces {
                commands.push_back(Command::SendNack {
                    face: *face,
                    nack: nack.clone(),
                });
            }
        }
        RouterRole::ConsumerGateway => {
            let prefix = nack.mitigated_prefix();
            let bad_faces: BTreeSet<FaceId> = store
                .get(&prefix)
                .map(|record| {
                    record
                        .fake
                        .is_good_consumer
                        .iter()
                        .chain(record.valid.is_good_consumer.iter())
                        .filter(|(_, good)| !**good)
                        .map(|(face, _)| *face)
                        .collect()
                })
                .unwrap_or_default();

            for face in &in_faces {
                if bad_faces.contains(face) {
                    continue;
                }
                commands.push_back(Command::SendNack {
                    face: *face,
                    nack: nack.clone(),
                });
            }
        }
    }

    commands
}

/// A received `DDOS_RESET_RATE` clears this record's rate-limiting bookkeeping without touching
/// `active`/`budget` — only the periodic revert tick deactivates a flavour.
fn handle_ddos_reset_rate(store: &mut RecordStore, nack: &Nack) -> VecDeque<Command> {
    let prefix = nack.mitigated_prefix();

    if let Some(record) = store.get_mut(&prefix) {
        record.fake.pushback_weight.clear();
        record.fake.is_good_consumer.clear();
        record.valid.pushback_weight.clear();
        record.valid.is_good_consumer.clear();
        record.per_face_interest_buffer.clear();
        tracing::debug!(%prefix, "cleared rate-limiting state on received DDOS_RESET_RATE");
    }

    VecDeque::new()
}
