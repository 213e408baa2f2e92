//! The async event loop that drives a [`Strategy`] end to end: a `tokio::select!` over the armed
//! revert timer and an inbound event channel.
//!
//! Real face I/O and the wire codec are out of this crate's scope — `execute` logs what it would
//! do instead of touching a socket, which is enough to exercise the strategy's decisions end to
//! end in a demo or integration test.

use crate::fixtures::{FaceRegistry, InMemoryFib, InMemoryPit};
use ndn_ddos_strategy::{Command, FaceId, Interest, Nack, Strategy};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// An event fed into the driver from outside (a test, or the demo scenario).
#[derive(Debug, Clone)]
pub enum SimEvent {
    Interest {
        in_face: FaceId,
        interest: Interest,
        has_out_record: bool,
    },
    Nack {
        nack: Nack,
    },
}

/// Runs the strategy's event loop until the event channel closes.
pub async fn run(
    mut strategy: Strategy,
    mut pit: InMemoryPit,
    mut fib: InMemoryFib,
    faces: FaceRegistry,
    mut events: mpsc::Receiver<SimEvent>,
) {
    let mut rng = rand::thread_rng();

    loop {
        let tokio_deadline = match strategy.revert_timer().deadline() {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                tokio::time::Instant::now() + remaining
            }
            // No timer armed: sleep far enough out that the event branch always wins first.
            None => tokio::time::Instant::now() + Duration::from_secs(3600),
        };
        let sleep = tokio::time::sleep_until(tokio_deadline);
        tokio::pin!(sleep);

        tokio::select! {
            () = &mut sleep => {
                let commands = strategy.handle_deadline_reached(Instant::now(), &mut rng);
                execute(commands);
            }
            event = events.recv() => {
                let Some(event) = event else {
                    tracing::info!("event channel closed, stopping driver");
                    break;
                };

                let commands = match event {
                    SimEvent::Interest { in_face, interest, has_out_record } => {
                        strategy.handle_interest(in_face, interest, has_out_record, &faces)
                    }
                    SimEvent::Nack { nack } => {
                        strategy.handle_nack(nack, &mut pit, &mut fib, &faces, Instant::now())
                    }
                };
                execute(commands);
            }
        }
    }
}

fn execute(commands: VecDeque<Command>) {
    for command in commands {
        match command {
            Command::SendNack { face, nack } => {
                tracing::info!(face = %face, reason = %nack.reason, tolerance = nack.tolerance, "send NACK");
            }
            Command::ForwardBestRoute { in_face, interest } => {
                tracing::info!(in_face = %in_face, name = %interest.name, "forward via best-route");
            }
            Command::ForwardLoadBalance { in_face, interest } => {
                tracing::info!(in_face = %in_face, name = %interest.name, "forward via load-balance");
            }
        }
    }
}
