use crate::nack::NackId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Mints fresh `NackId`s for a component acting as the very first hop to detect overload (a
/// producer-gateway-adjacent collaborator, out of this crate's scope, but one that needs a
/// source of ids to hand this strategy a well-formed NACK in the first place).
#[derive(Debug, Default)]
pub struct NackIdGenerator {
    next: AtomicU64,
}

impl NackIdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> NackId {
        NackId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
