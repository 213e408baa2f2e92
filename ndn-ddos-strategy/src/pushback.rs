//! Given a DDoS NACK (or, for the valid flavour, a prefix and the live PIT) computes per-face
//! pushback weight and the Interest-name manifest each downstream face is blamed for (§4.3).

use crate::collaborators::{Faces, Pit};
use crate::face::FaceId;
use crate::name::Name;
use std::collections::BTreeMap;

const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// `(face, weight, names this face is blamed for)`, one tuple per face left in the post-merge
/// weight map.
pub type PushbackResult = Vec<(FaceId, f64, Vec<Name>)>;

/// Fake-Interest mode (§4.3 "Fake mode"). `names` is the NACK's `fake_interest_names` sample.
pub fn fake_mode(
    weight: &mut BTreeMap<FaceId, f64>,
    is_good_consumer: &mut BTreeMap<FaceId, bool>,
    names: &[Name],
    pit: &impl Pit,
    faces: &impl Faces,
    is_consumer_gateway: bool,
) -> PushbackResult {
    if names.is_empty() {
        // "a NACK with zero names under FAKE_INTEREST results in no pushback" (§4.1 failure
        // semantics) — the record is still created/updated by the caller, just no weights change.
        return Vec::new();
    }

    let d = names.len() as f64;
    let mut tmp: BTreeMap<FaceId, f64> = BTreeMap::new();
    let mut per_face_names: BTreeMap<FaceId, Vec<Name>> = BTreeMap::new();

    for name in names {
        let Some(entry) = pit.find(name) else {
            continue; // unmatched name in NACK: skipped silently (§4.1, §7)
        };

        let distinct_faces = entry.distinct_faces();
        let m = distinct_faces.len();
        if m == 0 {
            continue;
        }

        for face in distinct_faces {
            *tmp.entry(face).or_insert(0.0) += 1.0 / (d * m as f64);
            per_face_names.entry(face).or_default().push(name.clone());
        }
    }

    merge_weights(weight, tmp, is_consumer_gateway, faces);

    for face in weight.keys() {
        is_good_consumer.insert(*face, true);
    }

    weight
        .iter()
        .map(|(face, w)| (*face, *w, per_face_names.get(face).cloned().unwrap_or_default()))
        .collect()
}

/// Valid-Interest-overload mode (§4.3 "Valid mode"). Ignores the NACK's name list and instead
/// scans the PIT under `prefix`; unlike fake mode this is an authoritative full recompute each
/// time (the PIT scan already sees every live Interest), so the result *replaces* the weight map
/// rather than merging with it.
pub fn valid_mode(
    weight: &mut BTreeMap<FaceId, f64>,
    is_good_consumer: &mut BTreeMap<FaceId, bool>,
    prefix: &Name,
    pit: &impl Pit,
    faces: &impl Faces,
    is_consumer_gateway: bool,
) -> PushbackResult {
    let entries = pit.entries_under(prefix);
    let m = entries.len();

    if m == 0 {
        weight.clear();
        return Vec::new();
    }

    let mut tmp: BTreeMap<FaceId, f64> = BTreeMap::new();
    let mut representative_name: BTreeMap<FaceId, Name> = BTreeMap::new();

    for entry in &entries {
        let mut in_records_per_face: BTreeMap<FaceId, usize> = BTreeMap::new();
        for face in &entry.in_records {
            *in_records_per_face.entry(*face).or_insert(0) += 1;
        }

        for (face, in_record_count) in in_records_per_face {
            *tmp.entry(face).or_insert(0.0) += 1.0 / in_record_count as f64;
            representative_name
                .entry(face)
                .or_insert_with(|| entry.name.clone());
        }
    }

    for w in tmp.values_mut() {
        *w /= m as f64;
    }

    *weight = tmp;

    if is_consumer_gateway {
        apply_consumer_fairness(weight, faces);
    }
    renormalize(weight);

    for face in weight.keys() {
        is_good_consumer.insert(*face, true);
    }

    weight
        .iter()
        .map(|(face, w)| {
            (
                *face,
                *w,
                representative_name.get(face).cloned().into_iter().collect(),
            )
        })
        .collect()
}

/// §4.3 merge policy: adopt `tmp` wholesale if there was nothing before; otherwise blend only
/// when `tmp` mentions a face the existing map doesn't already know about, and leave the map
/// untouched otherwise.
fn merge_weights(
    weight: &mut BTreeMap<FaceId, f64>,
    tmp: BTreeMap<FaceId, f64>,
    is_consumer_gateway: bool,
    faces: &impl Faces,
) {
    if weight.is_empty() {
        *weight = tmp;

        if is_consumer_gateway {
            apply_consumer_fairness(weight, faces);
        }

        renormalize(weight);
        return;
    }

    let introduces_new_face = tmp.keys().any(|face| !weight.contains_key(face));
    if !introduces_new_face {
        return;
    }

    let all_faces = weight.keys().chain(tmp.keys()).copied().collect::<std::collections::BTreeSet<_>>();
    let mut merged = BTreeMap::new();
    for face in all_faces {
        let old = weight.get(&face).copied().unwrap_or(0.0);
        let new = tmp.get(&face).copied().unwrap_or(0.0);
        merged.insert(face, (old + new) / 2.0);
    }

    *weight = merged;
    // §9 design note: one source branch halves rather than renormalises here and breaks P1 —
    // renormalise explicitly so the sum-to-one invariant holds after every merge.
    renormalize(weight);
}

/// Equal-share averaging over consumer-facing faces (§4.3 "consumer fairness"). Non-consumer
/// faces are left untouched.
fn apply_consumer_fairness(weight: &mut BTreeMap<FaceId, f64>, faces: &impl Faces) {
    let consumer_faces: Vec<FaceId> = weight
        .keys()
        .copied()
        .filter(|face| faces.is_consumer_face(*face))
        .collect();

    if consumer_faces.is_empty() {
        return;
    }

    let average =
        consumer_faces.iter().map(|face| weight[face]).sum::<f64>() / consumer_faces.len() as f64;

    for face in consumer_faces {
        weight.insert(face, average);
    }
}

fn renormalize(weight: &mut BTreeMap<FaceId, f64>) {
    let sum: f64 = weight.values().sum();
    if sum <= WEIGHT_SUM_EPSILON {
        return;
    }

    for w in weight.values_mut() {
        *w /= sum;
    }
}
