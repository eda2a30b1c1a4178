//! Merkle commitment over admitted transaction identifiers
//!
//! Leaves are the SHA-256 digests of the identifiers, folded pairwise
//! left-to-right over the *hex strings* of the previous layer. An odd layer
//! pairs its last element with the empty string rather than duplicating it;
//! that convention is part of the committed format and must not change, or
//! previously produced roots stop reproducing.

use crate::core::hash::sha256_hex;

/// Fold an ordered list of transaction identifiers into a single hex digest.
///
/// Returns `None` for an empty list; the coordinator treats that as
/// "nothing to mine" rather than committing to a sentinel digest.
pub fn merkle_root(ids: &[String]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }

    let mut layer: Vec<String> = ids.iter().map(|id| sha256_hex(id.as_bytes())).collect();

    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| {
                let mut combined = pair[0].clone();
                if let Some(right) = pair.get(1) {
                    combined.push_str(right);
                }
                sha256_hex(combined.as_bytes())
            })
            .collect();
    }

    layer.pop()
}
