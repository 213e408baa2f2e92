use crate::face::FaceId;
use crate::interest::Interest;
use crate::nack::Nack;

/// A side effect the strategy wants the host forwarder to perform.
///
/// The strategy itself never touches a socket or a face send-buffer: every entry point returns a
/// batch of these instead, for a driver loop to execute. PIT/FIB mutations are not modelled here —
/// those go straight through the `Pit`/`Fib` collaborators, because they are shared in-process
/// state, not I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Send `nack` out on `face`.
    SendNack { face: FaceId, nack: Nack },
    /// Forward `interest` via the best-route primitive, scoped by the face it arrived on.
    ForwardBestRoute { in_face: FaceId, interest: Interest },
    /// Forward `interest` via the load-balancing primitive (uniform random over eligible
    /// next-hops), scoped by the face it arrived on.
    ///
    /// A scope violation (no scope-eligible next hop) is the load-balance primitive's own
    /// failure mode, not this strategy's — it happens inside the black-box forwarding primitive
    /// the host executes, after the strategy has already returned this command, so the strategy
    /// never observes or reports it (§7).
    ForwardLoadBalance { in_face: FaceId, interest: Interest },
}
