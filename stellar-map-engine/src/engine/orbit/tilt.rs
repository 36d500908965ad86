//! Name-derived orbital tilts.
//!
//! A body's tilt is a pure function of its stable name, so every rebuild of
//! the same hierarchy produces the same orbital planes.

use serde::{Deserialize, Serialize};

/// Where a pivot takes its tilt from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiltSource {
    /// Hash of the body's stable name, independent of sibling order.
    #[default]
    NameHash,
    /// Interpolated across siblings with alternating Z sign.
    SiblingInterpolation,
}

/// 31-multiplier string hash over UTF-16 code units with 32-bit wrap-around.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Map a name to an `(x, z)` tilt inside `range`.
///
/// The low bits of the hash drive X and the high half drives Z, each folded
/// into `[0, 1)` by `% 10000`.
pub fn deterministic_tilt(name: &str, range: [f32; 2]) -> [f32; 2] {
    let hash = name_hash(name);
    let nx = (hash % 10_000).unsigned_abs() as f32 / 10_000.0;
    let nz = ((hash >> 16) % 10_000).unsigned_abs() as f32 / 10_000.0;
    let [min, max] = range;
    [min + nx * (max - min), min + nz * (max - min)]
}

pub fn family_tilt_name(family: &str) -> String {
    family.to_owned()
}

pub fn constellation_tilt_name(family: &str, constellation: &str) -> String {
    format!("{family}-{constellation}")
}

pub fn node_tilt_name(family: &str, constellation: &str, node_id: &str) -> String {
    format!("{family}-{constellation}-{node_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_matches_known_values() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 97 * 31 + 98);
        // Long names wrap like 32-bit integers instead of overflowing.
        let long = "Dynamic Programming-Knapsack Variants-unbounded-knapsack".repeat(4);
        let _ = name_hash(&long);
    }

    #[test]
    fn tilt_of_short_name() {
        let [x, z] = deterministic_tilt("a", [-0.5, 0.5]);
        assert!((x - -0.4903).abs() < 1e-5);
        assert!((z - -0.5).abs() < 1e-6);
    }

    #[test]
    fn hash_counts_utf16_units() {
        // U+1F680 is a surrogate pair: two units, not one scalar.
        let expected = (0xD83Di32 * 31).wrapping_add(0xDE80);
        assert_eq!(name_hash("\u{1F680}"), expected);
    }

    #[test]
    fn stable_names_join_with_dashes() {
        assert_eq!(constellation_tilt_name("F", "C"), "F-C");
        assert_eq!(node_tilt_name("F", "C", "n1"), "F-C-n1");
        assert_eq!(family_tilt_name("F"), "F");
    }

    proptest! {
        #[test]
        fn tilt_is_deterministic_and_in_range(name in "\\PC{0,40}", lo in -1.0f32..0.0, width in 0.01f32..2.0) {
            let range = [lo, lo + width];
            let first = deterministic_tilt(&name, range);
            let second = deterministic_tilt(&name.clone(), range);
            prop_assert_eq!(first, second);
            for t in first {
                prop_assert!(t >= range[0] - 1e-5 && t <= range[1] + 1e-5);
            }
        }
    }
}
