use crate::face::FaceId;
use crate::interest::Interest;
use crate::nack::NackId;
use crate::name::Name;
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

/// The role this router plays, fixed at construction — only the consumer gateway buffers and
/// meters Interests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterRole {
    ConsumerGateway,
    ProducerGateway,
    Normal,
}

impl RouterRole {
    pub fn is_consumer_gateway(self) -> bool {
        matches!(self, RouterRole::ConsumerGateway)
    }

    pub fn is_producer_gateway(self) -> bool {
        matches!(self, RouterRole::ProducerGateway)
    }
}

/// Per-mitigation-flavour bookkeeping, duplicated for `fake` and `valid` since the two
/// mitigations are orthogonal and can be live independently (§3).
#[derive(Debug, Clone, Default)]
pub struct FlavourState {
    pub active: bool,
    /// `fake_tolerance` or `valid_capacity` depending on flavour.
    pub budget: u64,
    pub pushback_weight: BTreeMap<FaceId, f64>,
    pub is_good_consumer: BTreeMap<FaceId, bool>,
    pub last_nack_id: Option<NackId>,
    pub last_nack_ts: Option<Instant>,
    pub revert_counter: f64,
}

impl FlavourState {
    fn new(default_revert_ticks: f64) -> Self {
        Self {
            revert_counter: default_revert_ticks,
            ..Default::default()
        }
    }
}

/// Which of the two orthogonal mitigations a piece of logic is operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavour {
    Fake,
    Valid,
}

impl Flavour {
    pub const ALL: [Flavour; 2] = [Flavour::Fake, Flavour::Valid];
}

impl std::fmt::Display for Flavour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavour::Fake => f.write_str("fake"),
            Flavour::Valid => f.write_str("valid"),
        }
    }
}

/// One per name prefix currently under mitigation (§3).
#[derive(Debug, Clone)]
pub struct PrefixRecord {
    pub prefix: Name,
    pub fake: FlavourState,
    pub valid: FlavourState,
    /// Only populated at the consumer-gateway role.
    pub per_face_interest_buffer: BTreeMap<FaceId, VecDeque<Interest>>,
}

impl PrefixRecord {
    pub fn new(prefix: Name, default_revert_ticks: f64) -> Self {
        Self {
            prefix,
            fake: FlavourState::new(default_revert_ticks),
            valid: FlavourState::new(default_revert_ticks),
            per_face_interest_buffer: BTreeMap::new(),
        }
    }

    /// I3: a record with neither flavour active no longer belongs in the store.
    pub fn is_idle(&self) -> bool {
        !self.fake.active && !self.valid.active
    }

    pub fn flavour(&self, flavour: Flavour) -> &FlavourState {
        match flavour {
            Flavour::Fake => &self.fake,
            Flavour::Valid => &self.valid,
        }
    }

    pub fn flavour_mut(&mut self, flavour: Flavour) -> &mut FlavourState {
        match flavour {
            Flavour::Fake => &mut self.fake,
            Flavour::Valid => &mut self.valid,
        }
    }

    /// I2: a face may only be present in the per-face buffer if it carries a live weight under
    /// at least one flavour.
    pub fn has_weight_for(&self, face: FaceId) -> bool {
        self.fake.pushback_weight.contains_key(&face) || self.valid.pushback_weight.contains_key(&face)
    }
}
