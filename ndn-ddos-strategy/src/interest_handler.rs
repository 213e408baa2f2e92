//! Interest-arrival decision: forward unconditionally, buffer for later metering, or load-balance
//! (§4.5).

use crate::collaborators::Faces;
use crate::command::Command;
use crate::config::StrategyConfig;
use crate::face::FaceId;
use crate::interest::Interest;
use crate::metrics::StrategyMetrics;
use crate::record_store::RecordStore;
use std::collections::VecDeque;

#[allow(clippy::too_many_arguments)]
pub fn handle_interest(
    store: &mut RecordStore,
    config: &StrategyConfig,
    in_face: FaceId,
    interest: Interest,
    has_out_record: bool,
    faces: &impl Faces,
    metrics: Option<&StrategyMetrics>,
) -> VecDeque<Command> {
    let mut commands = VecDeque::new();

    if has_out_record {
        // Retransmission of an Interest this router already forwarded; nothing to do (§4.5 step 1).
        return commands;
    }

    let Some(record) = store.find_matching(&interest.name) else {
        commands.push_back(Command::ForwardBestRoute { in_face, interest });
        return commands;
    };

    let prefix = record.prefix.clone();
    let is_buffered_case = config.router_role.is_consumer_gateway()
        && faces.is_consumer_face(in_face)
        && record.has_weight_for(in_face);

    if is_buffered_case {
        let record = store.get_mut(&prefix).expect("just matched above");
        let buffer = record.per_face_interest_buffer.entry(in_face).or_default();

        if let Some(max) = config.max_buffer_per_face
            && buffer.len() >= max
        {
            // Drop the oldest buffered Interest for this face to make room, preserving FIFO
            // admission order for everything already queued.
            buffer.pop_front();
            if let Some(metrics) = metrics {
                metrics.interests_dropped(1);
            }
        }

        buffer.push_back(interest);
        if let Some(metrics) = metrics {
            metrics.interest_buffered();
        }

        return commands;
    }

    commands.push_back(Command::ForwardLoadBalance { in_face, interest });
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Name;

    struct AllConsumerFaces;
    impl Faces for AllConsumerFaces {
        fn is_consumer_face(&self, _face: FaceId) -> bool {
            true
        }
    }

    fn name(s: &str) -> Name {
        Name::from_components(s.split('/').filter(|c| !c.is_empty()))
    }

    #[test]
    fn retransmission_is_ignored() {
        let mut store = RecordStore::new();
        let config = StrategyConfig::new(crate::record::RouterRole::ConsumerGateway);

        let commands = handle_interest(
            &mut store,
            &config,
            FaceId(1),
            Interest::new(name("/a")),
            true,
            &AllConsumerFaces,
            None,
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn unmatched_prefix_forwards_via_best_route() {
        let mut store = RecordStore::new();
        let config = StrategyConfig::new(crate::record::RouterRole::Normal);

        let commands = handle_interest(
            &mut store,
            &config,
            FaceId(1),
            Interest::new(name("/a")),
            false,
            &AllConsumerFaces,
            None,
        );

        assert_eq!(
            commands,
            VecDeque::from([Command::ForwardBestRoute {
                in_face: FaceId(1),
                interest: Interest::new(name("/a"))
            }])
        );
    }

    #[test]
    fn matched_non_buffered_case_load_balances() {
        let mut store = RecordStore::new();
        let record = store.get_or_insert(&name("/a"), 3.0);
        record.fake.pushback_weight.insert(FaceId(1), 1.0);
        let config = StrategyConfig::new(crate::record::RouterRole::Normal);

        let commands = handle_interest(
            &mut store,
            &config,
            FaceId(1),
            Interest::new(name("/a/x")),
            false,
            &AllConsumerFaces,
            None,
        );

        assert_eq!(
            commands,
            VecDeque::from([Command::ForwardLoadBalance {
                in_face: FaceId(1),
                interest: Interest::new(name("/a/x"))
            }])
        );
    }

    #[test]
    fn matched_buffered_case_at_consumer_gateway_buffers() {
        let mut store = RecordStore::new();
        let record = store.get_or_insert(&name("/a"), 3.0);
        record.fake.pushback_weight.insert(FaceId(1), 1.0);
        let config = StrategyConfig::new(crate::record::RouterRole::ConsumerGateway);

        let commands = handle_interest(
            &mut store,
            &config,
            FaceId(1),
            Interest::new(name("/a/x")),
            false,
            &AllConsumerFaces,
            None,
        );

        assert!(commands.is_empty());
        let record = store.get(&name("/a")).unwrap();
        assert_eq!(record.per_face_interest_buffer[&FaceId(1)].len(), 1);
    }

    #[test]
    fn max_buffer_per_face_drops_oldest() {
        let mut store = RecordStore::new();
        let record = store.get_or_insert(&name("/a"), 3.0);
        record.fake.pushback_weight.insert(FaceId(1), 1.0);
        let mut config = StrategyConfig::new(crate::record::RouterRole::ConsumerGateway);
        config.max_buffer_per_face = Some(2);

        for i in 0..3 {
            handle_interest(
                &mut store,
                &config,
                FaceId(1),
                Interest::new(name(&format!("/a/{i}"))),
                false,
                &AllConsumerFaces,
                None,
            );
        }

        let record = store.get(&name("/a")).unwrap();
        let buffer = &record.per_face_interest_buffer[&FaceId(1)];
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].name, name("/a/1"));
        assert_eq!(buffer[1].name, name("/a/2"));
    }
}
