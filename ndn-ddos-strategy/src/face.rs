use std::fmt;

/// Identifies a face (a logical link to a neighbor router or local application).
///
/// Opaque from the strategy's point of view — it never does more than use this as a map key and
/// hand it back to the face layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u64);

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face:{}", self.0)
    }
}

impl From<u64> for FaceId {
    fn from(id: u64) -> Self {
        FaceId(id)
    }
}
