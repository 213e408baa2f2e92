//! Arbitrary-generator helpers for property tests, gated behind the `proptest` feature. Kept
//! separate from `#[cfg(test)]` code so an external crate's proptest suite can reuse these
//! generators too.

use crate::{FaceId, Name, NackId};
use proptest::prelude::*;

pub fn arb_face_id(max_faces: u64) -> impl Strategy<Value = FaceId> {
    (1..=max_faces.max(1)).prop_map(FaceId)
}

pub fn arb_nack_id() -> impl Strategy<Value = NackId> {
    any::<u64>().prop_map(NackId)
}

pub fn arb_name_component() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

pub fn arb_name(len: std::ops::Range<usize>) -> impl Strategy<Value = Name> {
    prop::collection::vec(arb_name_component(), len).prop_map(Name::from_components)
}
