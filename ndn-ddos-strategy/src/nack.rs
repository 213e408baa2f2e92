use crate::name::Name;
use std::fmt;

/// Duplicate-suppression key carried on every DDoS NACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NackId(pub u64);

impl fmt::Display for NackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reason code carried by a DDoS NACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NackReason {
    FakeInterest,
    ValidInterestOverload,
    HintChangeNotice,
    DdosResetRate,
    /// Any other reason this strategy does not act on and delegates to the default processor.
    Other,
}

impl fmt::Display for NackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NackReason::FakeInterest => "FAKE_INTEREST",
            NackReason::ValidInterestOverload => "VALID_INTEREST_OVERLOAD",
            NackReason::HintChangeNotice => "HINT_CHANGE_NOTICE",
            NackReason::DdosResetRate => "DDOS_RESET_RATE",
            NackReason::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// A DDoS NACK, semantic fields only (no wire layout here).
#[derive(Debug, Clone, PartialEq)]
pub struct Nack {
    pub reason: NackReason,
    /// The name of the Interest this NACK answers. The mitigated prefix is
    /// `name.prefix(prefix_len)`.
    pub name: Name,
    pub prefix_len: usize,
    /// Interests per aggregation window. Reused as `capacity` for the valid flavour and zero for
    /// `DDOS_RESET_RATE`.
    pub tolerance: u64,
    pub nack_id: NackId,
    /// Offending-name sample for `FAKE_INTEREST`; for `HINT_CHANGE_NOTICE` the first element is
    /// the replacement FIB registration. Empty for other reasons.
    pub fake_interest_names: Vec<Name>,
}

impl Nack {
    /// The prefix this NACK mitigates, truncating an over-long `prefix_len` to the full name.
    pub fn mitigated_prefix(&self) -> Name {
        self.name.prefix(self.prefix_len)
    }
}
