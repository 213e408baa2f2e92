//! The periodic revert tick (§4.6): drains buffers, applies additive-increase recovery per
//! record, erases idle records, and decides whether to reschedule.

use crate::clock::RevertTimer;
use crate::command::Command;
use crate::config::StrategyConfig;
use crate::face::FaceId;
use crate::metrics::StrategyMetrics;
use crate::nack::{Nack, NackReason};
use crate::nack_id::NackIdGenerator;
use crate::rate_limiter;
use crate::record::{Flavour, PrefixRecord};
use crate::record_store::RecordStore;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Instant;

#[allow(clippy::too_many_arguments)]
pub fn run_tick(
    store: &mut RecordStore,
    config: &StrategyConfig,
    revert_timer: &mut RevertTimer,
    nack_ids: &NackIdGenerator,
    now: Instant,
    rng: &mut impl Rng,
    metrics: Option<&StrategyMetrics>,
) -> VecDeque<Command> {
    let mut commands = VecDeque::new();

    if config.router_role.is_consumer_gateway() {
        commands.extend(rate_limiter::drain_buffers(
            store,
            config.tick_interval,
            rng,
            metrics,
        ));
    }

    for (_, record) in store.iter_mut() {
        for flavour in Flavour::ALL {
            revert_flavour(record, flavour, config, now, nack_ids, &mut commands, metrics);
        }
    }

    let erased = store.erase_idle();
    if let Some(metrics) = metrics {
        for _ in 0..erased {
            metrics.record_erased();
        }
    }

    if store.is_empty() {
        // Transition to NORMAL: do not reschedule (§4.6 step 4, P3).
        revert_timer.disarm();
    } else {
        revert_timer.arm_at_least(now, config.tick_interval);
    }

    commands
}

#[allow(clippy::too_many_arguments)]
fn revert_flavour(
    record: &mut PrefixRecord,
    flavour: Flavour,
    config: &StrategyConfig,
    now: Instant,
    nack_ids: &NackIdGenerator,
    commands: &mut VecDeque<Command>,
    metrics: Option<&StrategyMetrics>,
) {
    if !record.flavour(flavour).active {
        return;
    }

    if let Some(last_ts) = record.flavour(flavour).last_nack_ts
        && now.duration_since(last_ts) < config.tick_interval
    {
        return; // grace window (§4.6 step 2a)
    }

    // Decrement by one tick, not by `T` in seconds: the counter is denominated in ticks
    // (`default_revert_ticks`), and S5 ("after 3 ticks ... fake_tolerance is halved") only holds
    // if a counter of 3.0 reaches zero after exactly 3 tick firings regardless of `T`'s value.
    record.flavour_mut(flavour).revert_counter -= 1.0;

    if record.flavour(flavour).revert_counter > 0.0 {
        return;
    }

    if !config.router_role.is_consumer_gateway() {
        record.flavour_mut(flavour).active = false;
        return;
    }

    let prefix = record.prefix.clone();
    let good_faces: Vec<FaceId> = record
        .flavour(flavour)
        .is_good_consumer
        .iter()
        .filter(|(_, good)| **good)
        .map(|(face, _)| *face)
        .collect();

    let state = record.flavour_mut(flavour);
    for face in good_faces {
        state.pushback_weight.remove(&face);
        state.is_good_consumer.remove(&face);

        if let Some(metrics) = metrics {
            metrics.nack_emitted("DDOS_RESET_RATE");
        }
        tracing::info!(%prefix, face = %face, %flavour, "released good consumer, signalling rate reset");
        commands.push_back(Command::SendNack {
            face,
            nack: Nack {
                reason: NackReason::DdosResetRate,
                name: prefix.clone(),
                prefix_len: prefix.len(),
                tolerance: 0,
                nack_id: nack_ids.next(),
                fake_interest_names: Vec::new(),
            },
        });
    }

    if state.pushback_weight.is_empty() {
        state.active = false;
    } else {
        // Multiplicative decrease of the surviving (presumed bad) faces' budget (§4.6 step 2b).
        state.revert_counter = config.default_revert_ticks;
        state.budget /= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Name;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn name(s: &str) -> Name {
        Name::from_components(s.split('/').filter(|c| !c.is_empty()))
    }

    #[test]
    fn grace_window_skips_a_freshly_nacked_record() {
        let mut store = RecordStore::new();
        let now = Instant::now();
        let record = store.get_or_insert(&name("/a"), 3.0);
        record.fake.active = true;
        record.fake.last_nack_ts = Some(now);

        let config = StrategyConfig::new(crate::record::RouterRole::Normal);
        let mut revert_timer = RevertTimer::new();
        let nack_ids = NackIdGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);

        run_tick(&mut store, &config, &mut revert_timer, &nack_ids, now, &mut rng, None);

        assert!(store.get(&name("/a")).unwrap().fake.active);
    }

    #[test]
    fn non_consumer_gateway_deactivates_when_counter_expires() {
        let mut store = RecordStore::new();
        let now = Instant::now();
        let record = store.get_or_insert(&name("/a"), 1.0);
        record.fake.active = true;
        record.fake.last_nack_ts = Some(now - Duration::from_millis(200));
        record.fake.revert_counter = 0.05;

        let config = StrategyConfig::new(crate::record::RouterRole::Normal);
        let mut revert_timer = RevertTimer::new();
        let nack_ids = NackIdGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);

        run_tick(&mut store, &config, &mut revert_timer, &nack_ids, now, &mut rng, None);

        assert!(store.get(&name("/a")).is_none());
    }

    #[test]
    fn consumer_gateway_releases_good_consumer_and_erases_idle_record() {
        let mut store = RecordStore::new();
        let now = Instant::now();
        let record = store.get_or_insert(&name("/a"), 1.0);
        record.fake.active = true;
        record.fake.last_nack_ts = Some(now - Duration::from_millis(200));
        record.fake.revert_counter = 0.05;
        record.fake.pushback_weight.insert(FaceId(1), 1.0);
        record.fake.is_good_consumer.insert(FaceId(1), true);

        let config = StrategyConfig::new(crate::record::RouterRole::ConsumerGateway);
        let mut revert_timer = RevertTimer::new();
        let nack_ids = NackIdGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);

        let commands = run_tick(&mut store, &config, &mut revert_timer, &nack_ids, now, &mut rng, None);

        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::SendNack {
                nack: Nack {
                    reason: NackReason::DdosResetRate,
                    ..
                },
                ..
            }
        ));
        assert!(store.is_empty());
        assert!(!revert_timer.is_armed());
    }

    #[test]
    fn consumer_gateway_halves_budget_for_surviving_bad_faces() {
        let mut store = RecordStore::new();
        let now = Instant::now();
        let record = store.get_or_insert(&name("/a"), 1.0);
        record.fake.active = true;
        record.fake.budget = 10;
        record.fake.last_nack_ts = Some(now - Duration::from_millis(200));
        record.fake.revert_counter = 0.05;
        record.fake.pushback_weight.insert(FaceId(1), 1.0);
        record.fake.is_good_consumer.insert(FaceId(1), false);

        let mut config = StrategyConfig::new(crate::record::RouterRole::ConsumerGateway);
        config.default_revert_ticks = 1.0;
        let mut revert_timer = RevertTimer::new();
        let nack_ids = NackIdGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);

        run_tick(&mut store, &config, &mut revert_timer, &nack_ids, now, &mut rng, None);

        let record = store.get(&name("/a")).unwrap();
        assert!(record.fake.active);
        assert_eq!(record.fake.budget, 5);
        assert_eq!(record.fake.revert_counter, 1.0);
    }

    #[test]
    fn empty_store_disarms_timer() {
        let mut store = RecordStore::new();
        let now = Instant::now();
        let config = StrategyConfig::new(crate::record::RouterRole::Normal);
        let mut revert_timer = RevertTimer::new();
        revert_timer.arm_at_least(now, config.tick_interval);
        let nack_ids = NackIdGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);

        run_tick(&mut store, &config, &mut revert_timer, &nack_ids, now, &mut rng, None);

        assert!(!revert_timer.is_armed());
    }
}
