//! Demo binary driving `ndn-ddos-strategy` against an in-memory PIT/FIB/face table: a single-face
//! fake-Interest attack, buffered Interests getting rate-limited on the next tick, and
//! additive-increase recovery once the attack stops.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ndn_ddos_sim::{FaceRegistry, InMemoryFib, InMemoryPit, SimEvent, run};
use ndn_ddos_strategy::{FaceId, Interest, Name, Nack, NackId, NackReason, RouterRole, Strategy, StrategyConfig};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Parser)]
#[command(about = "Runs an in-memory demo of the DDoS mitigation strategy")]
struct Args {
    /// The role this demo router plays; only `consumer-gateway` buffers and meters Interests.
    #[arg(long, value_enum, default_value_t = CliRouterRole::ConsumerGateway)]
    router_role: CliRouterRole,

    /// Revert/drain period `T`, in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_interval_ms: u64,

    /// Initial value for each flavour's revert counter.
    #[arg(long, default_value_t = 3.0)]
    default_revert_ticks: f64,

    /// `RUST_LOG`-style filter directives.
    #[arg(long, env = "NDN_DDOS_LOG", default_value = "info")]
    log: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRouterRole {
    ConsumerGateway,
    ProducerGateway,
    Normal,
}

impl From<CliRouterRole> for RouterRole {
    fn from(role: CliRouterRole) -> Self {
        match role {
            CliRouterRole::ConsumerGateway => RouterRole::ConsumerGateway,
            CliRouterRole::ProducerGateway => RouterRole::ProducerGateway,
            CliRouterRole::Normal => RouterRole::Normal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::setup_global_subscriber(&args.log).context("Failed to set up logging")?;

    let mut config = StrategyConfig::new(args.router_role.into());
    config.tick_interval = Duration::from_millis(args.tick_interval_ms);
    config.default_revert_ticks = args.default_revert_ticks;

    let strategy = Strategy::new(config).context("Invalid strategy configuration")?;

    let mut pit = InMemoryPit::new();
    let fib = InMemoryFib::new();
    let mut faces = FaceRegistry::new();
    faces.mark_consumer_face(FaceId(1));

    let name_x = Name::from_components(["a", "x"]);
    let name_y = Name::from_components(["a", "y"]);
    pit.insert(name_x.clone(), vec![FaceId(1)]);
    pit.insert(name_y.clone(), vec![FaceId(1)]);

    let (sender, receiver) = mpsc::channel(32);

    let driver = tokio::spawn(run(strategy, pit, fib, faces, receiver));

    tracing::info!("Submitting a FAKE_INTEREST DDoS NACK for /a from the upstream producer gateway");
    sender
        .send(SimEvent::Nack {
            nack: Nack {
                reason: NackReason::FakeInterest,
                name: name_x.clone(),
                prefix_len: 1,
                tolerance: 10,
                nack_id: NackId(1),
                fake_interest_names: vec![name_x, name_y],
            },
        })
        .await
        .context("driver task exited before accepting the opening NACK")?;

    tracing::info!("Submitting 25 buffered Interests for /a/z on the attacking face");
    for _ in 0..25 {
        sender
            .send(SimEvent::Interest {
                in_face: FaceId(1),
                interest: Interest::new(Name::from_components(["a", "z"])),
                has_out_record: false,
            })
            .await
            .context("driver task exited before accepting demo Interests")?;
    }

    tokio::time::sleep(Duration::from_millis(args.tick_interval_ms * 4)).await;

    drop(sender);
    driver.await.context("driver task panicked")?;

    Ok(())
}
