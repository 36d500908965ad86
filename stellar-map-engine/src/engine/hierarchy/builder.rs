use std::collections::HashSet;

use constants::spatial::MAX_DIFFICULTY;
use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{Constellation, Family, Hierarchy, Node, constellation_key};

/// Fields lifted out of a node entry; everything else lands in `Node::extra`.
const NODE_FIELDS: [&str; 4] = ["id", "title", "difficulty", "link"];

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("hierarchy root must be a mapping of family names, found {found}")]
    NotAMapping { found: &'static str },
    #[error("hierarchy snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Data-quality problems that were skipped or corrected while building.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataWarning {
    #[error("family `{family}` is not a mapping of constellations, skipped")]
    FamilyNotAMapping { family: String },
    #[error("constellation `{family}/{constellation}` is not a list of nodes, skipped")]
    ConstellationNotAList {
        family: String,
        constellation: String,
    },
    #[error("node #{position} in `{family}/{constellation}` skipped: {reason}")]
    MalformedNode {
        family: String,
        constellation: String,
        position: usize,
        reason: &'static str,
    },
    #[error("node `{id}` already placed, duplicate in `{family}/{constellation}` skipped")]
    DuplicateNode {
        id: String,
        family: String,
        constellation: String,
    },
    #[error("constellation `{family}/{constellation}` shares key `{key}` with an earlier one, skipped")]
    DuplicateConstellationKey {
        family: String,
        constellation: String,
        key: String,
    },
    #[error("node `{id}` difficulty {value} clamped to {clamped}")]
    DifficultyClamped { id: String, value: f64, clamped: u8 },
    #[error("node `{id}` difficulty {value} is not numeric, using 0")]
    DifficultyNotNumeric { id: String, value: String },
    #[error("constellation `{family}/{constellation}` has no nodes, skipped")]
    EmptyConstellation {
        family: String,
        constellation: String,
    },
    #[error("family `{family}` has no constellations, skipped")]
    EmptyFamily { family: String },
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub hierarchy: Hierarchy,
    pub warnings: Vec<DataWarning>,
}

/// Parse a raw JSON snapshot and build the tree.
pub fn parse_hierarchy(json: &str) -> Result<BuildReport, HierarchyError> {
    let snapshot: Value = serde_json::from_str(json)?;
    build_hierarchy(&snapshot)
}

/// Build the tree from a nested `family -> constellation -> [node]` mapping.
///
/// Bad entries never abort the build. They are dropped and reported in
/// [`BuildReport::warnings`]; only a root that is not a mapping fails.
pub fn build_hierarchy(snapshot: &Value) -> Result<BuildReport, HierarchyError> {
    let Value::Object(root) = snapshot else {
        return Err(HierarchyError::NotAMapping {
            found: value_kind(snapshot),
        });
    };

    let mut warnings = Vec::new();
    let mut placed: HashSet<String> = HashSet::new();
    // Registry keys of kept constellations; dashed names can collide.
    let mut claimed_keys: HashSet<String> = HashSet::new();
    let mut families = Vec::with_capacity(root.len());

    for (family_name, family_value) in root {
        let Value::Object(constellation_map) = family_value else {
            warnings.push(DataWarning::FamilyNotAMapping {
                family: family_name.clone(),
            });
            continue;
        };

        let mut constellations = Vec::with_capacity(constellation_map.len());
        for (constellation_name, nodes_value) in constellation_map {
            let Value::Array(entries) = nodes_value else {
                warnings.push(DataWarning::ConstellationNotAList {
                    family: family_name.clone(),
                    constellation: constellation_name.clone(),
                });
                continue;
            };

            let key = constellation_key(family_name, constellation_name);
            if claimed_keys.contains(&key) {
                warnings.push(DataWarning::DuplicateConstellationKey {
                    family: family_name.clone(),
                    constellation: constellation_name.clone(),
                    key,
                });
                continue;
            }

            let mut nodes = Vec::with_capacity(entries.len());
            for (position, entry) in entries.iter().enumerate() {
                let node = match parse_node(entry, &mut warnings) {
                    Ok(node) => node,
                    Err(reason) => {
                        warnings.push(DataWarning::MalformedNode {
                            family: family_name.clone(),
                            constellation: constellation_name.clone(),
                            position,
                            reason,
                        });
                        continue;
                    }
                };

                if !placed.insert(node.id.clone()) {
                    warnings.push(DataWarning::DuplicateNode {
                        id: node.id,
                        family: family_name.clone(),
                        constellation: constellation_name.clone(),
                    });
                    continue;
                }
                nodes.push(node);
            }

            if nodes.is_empty() {
                warnings.push(DataWarning::EmptyConstellation {
                    family: family_name.clone(),
                    constellation: constellation_name.clone(),
                });
                continue;
            }

            claimed_keys.insert(key);
            constellations.push(Constellation {
                name: constellation_name.clone(),
                nodes,
            });
        }

        if constellations.is_empty() {
            warnings.push(DataWarning::EmptyFamily {
                family: family_name.clone(),
            });
            continue;
        }

        families.push(Family {
            name: family_name.clone(),
            constellations,
        });
    }

    Ok(BuildReport {
        hierarchy: Hierarchy::from_families(families),
        warnings,
    })
}

fn parse_node(entry: &Value, warnings: &mut Vec<DataWarning>) -> Result<Node, &'static str> {
    let Value::Object(fields) = entry else {
        return Err("entry is not an object");
    };

    let id = match fields.get("id") {
        Some(Value::String(id)) if id.trim().is_empty() => return Err("empty `id`"),
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        Some(_) => return Err("`id` is neither a string nor a number"),
        None => return Err("missing `id`"),
    };

    let title = match fields.get("title") {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        _ => id.clone(),
    };

    let link = fields
        .get("link")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let difficulty = parse_difficulty(&id, fields.get("difficulty"), warnings);

    let extra: Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| !NODE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Node {
        id,
        title,
        difficulty,
        link,
        extra,
    })
}

fn parse_difficulty(id: &str, raw: Option<&Value>, warnings: &mut Vec<DataWarning>) -> u8 {
    let value = match raw {
        None | Some(Value::Null) => return 0,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let Some(value) = value.filter(|v| v.is_finite()) else {
        warnings.push(DataWarning::DifficultyNotNumeric {
            id: id.to_owned(),
            value: raw.map(Value::to_string).unwrap_or_default(),
        });
        return 0;
    };

    let clamped = value.round().clamp(0.0, f64::from(MAX_DIFFICULTY)) as u8;
    if value < 0.0 || value > f64::from(MAX_DIFFICULTY) {
        warnings.push(DataWarning::DifficultyClamped {
            id: id.to_owned(),
            value,
            clamped,
        });
    }
    clamped
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order_and_domain_fields() {
        let snapshot = json!({
            "Zeta": { "Second": [ { "id": "z1", "title": "Z one", "topic": "trees" } ] },
            "Alpha": {
                "First": [ { "id": "a1", "difficulty": 3, "link": "/a1" } ],
                "Second": [ { "id": "a2", "difficulty": "7" } ]
            }
        });

        let report = build_hierarchy(&snapshot).unwrap();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);

        let names: Vec<_> = report
            .hierarchy
            .families()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["Zeta", "Alpha"]);

        let z1 = report.hierarchy.find_node("z1").unwrap().node;
        assert_eq!(z1.title, "Z one");
        assert_eq!(z1.difficulty, 0);
        assert_eq!(z1.extra.get("topic"), Some(&json!("trees")));

        let a1 = report.hierarchy.find_node("a1").unwrap().node;
        assert_eq!(a1.title, "a1");
        assert_eq!(a1.link.as_deref(), Some("/a1"));
        assert!(a1.extra.is_empty());

        assert_eq!(report.hierarchy.find_node("a2").unwrap().node.difficulty, 7);
    }

    #[test]
    fn skips_malformed_entries_and_empty_groupings() {
        let snapshot = json!({
            "Broken": { "Nothing": [ 42, { "title": "no id" } ] },
            "Flat": "not a mapping",
            "Mixed": {
                "Empty": [],
                "Kept": [ { "id": "k1" }, "junk" ]
            }
        });

        let report = build_hierarchy(&snapshot).unwrap();
        let tree = &report.hierarchy;

        assert_eq!(tree.families().len(), 1);
        assert_eq!(tree.families()[0].name, "Mixed");
        assert_eq!(tree.families()[0].constellations.len(), 1);
        assert_eq!(tree.node_count(), 1);

        assert!(report.warnings.contains(&DataWarning::EmptyFamily {
            family: "Broken".into()
        }));
        assert!(report.warnings.contains(&DataWarning::FamilyNotAMapping {
            family: "Flat".into()
        }));
        assert!(report.warnings.contains(&DataWarning::EmptyConstellation {
            family: "Mixed".into(),
            constellation: "Empty".into()
        }));
        let malformed = report
            .warnings
            .iter()
            .filter(|w| matches!(w, DataWarning::MalformedNode { .. }))
            .count();
        assert_eq!(malformed, 3);
    }

    #[test]
    fn difficulty_is_clamped_and_reported() {
        let snapshot = json!({
            "F": { "C": [
                { "id": "hi", "difficulty": 14 },
                { "id": "lo", "difficulty": -2 },
                { "id": "word", "difficulty": "hard" }
            ] }
        });

        let report = build_hierarchy(&snapshot).unwrap();
        let tree = &report.hierarchy;
        assert_eq!(tree.find_node("hi").unwrap().node.difficulty, 10);
        assert_eq!(tree.find_node("lo").unwrap().node.difficulty, 0);
        assert_eq!(tree.find_node("word").unwrap().node.difficulty, 0);
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn duplicate_ids_keep_the_first_placement() {
        let snapshot = json!({
            "F": {
                "A": [ { "id": "n", "title": "first" } ],
                "B": [ { "id": "n", "title": "second" }, { "id": "m" } ]
            }
        });

        let report = build_hierarchy(&snapshot).unwrap();
        let location = report.hierarchy.find_node("n").unwrap();
        assert_eq!(location.constellation.name, "A");
        assert_eq!(location.node.title, "first");
        assert_eq!(report.hierarchy.node_count(), 2);
    }

    #[test]
    fn dashed_names_cannot_share_a_registry_key() {
        let snapshot = json!({
            "A-B": { "C": [ { "id": "first" } ] },
            "A": {
                "B-C": [ { "id": "second" } ],
                "D": [ { "id": "third" } ]
            }
        });

        let report = build_hierarchy(&snapshot).unwrap();
        let tree = &report.hierarchy;

        assert_eq!(tree.families().len(), 2);
        assert!(tree.constellation("A", "B-C").is_none());
        assert!(tree.find_node("second").is_none());
        assert!(tree.find_node("third").is_some());
        assert_eq!(
            report.warnings,
            vec![DataWarning::DuplicateConstellationKey {
                family: "A".into(),
                constellation: "B-C".into(),
                key: "A-B-C".into(),
            }]
        );
    }

    #[test]
    fn blank_id_is_reported_as_empty() {
        let snapshot = json!({ "F": { "C": [ { "id": "  " }, { "id": "ok" } ] } });

        let report = build_hierarchy(&snapshot).unwrap();
        assert_eq!(
            report.warnings,
            vec![DataWarning::MalformedNode {
                family: "F".into(),
                constellation: "C".into(),
                position: 0,
                reason: "empty `id`",
            }]
        );
    }

    #[test]
    fn rejects_non_mapping_root() {
        let err = build_hierarchy(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, HierarchyError::NotAMapping { found: "a list" }));
        assert!(matches!(
            parse_hierarchy("{ not json"),
            Err(HierarchyError::Json(_))
        ));
    }

    fn snapshot_strategy() -> impl Strategy<Value = Value> {
        let node = prop_oneof![
            (0u8..40, proptest::option::of(0u8..15))
                .prop_map(|(id, d)| json!({ "id": format!("n{id}"), "difficulty": d })),
            Just(json!({ "title": "missing id" })),
            Just(json!(7)),
        ];
        let constellation = proptest::collection::vec(node, 0..6);
        // Optional dashes make `family-constellation` keys collide.
        let family = proptest::collection::btree_map("(a-)?[a-b]", constellation, 0..4);
        proptest::collection::btree_map("A(-a)?|B", family, 0..4).prop_map(|families| {
            let root: Map<String, Value> = families
                .into_iter()
                .map(|(name, constellations)| {
                    let inner: Map<String, Value> = constellations
                        .into_iter()
                        .map(|(c, nodes)| (c, Value::Array(nodes)))
                        .collect();
                    (name, Value::Object(inner))
                })
                .collect();
            Value::Object(root)
        })
    }

    proptest! {
        #[test]
        fn built_tree_has_unique_nodes_keys_and_no_empty_groupings(snapshot in snapshot_strategy()) {
            let report = build_hierarchy(&snapshot).unwrap();
            let tree = &report.hierarchy;

            let mut ids = HashSet::new();
            let mut keys = HashSet::new();
            for family in tree.families() {
                prop_assert!(!family.constellations.is_empty());
                for constellation in &family.constellations {
                    prop_assert!(!constellation.nodes.is_empty());
                    let key = constellation_key(&family.name, &constellation.name);
                    prop_assert!(keys.insert(key.clone()), "key {} claimed twice", key);
                    for node in &constellation.nodes {
                        prop_assert!(ids.insert(node.id.clone()), "node {} placed twice", node.id);
                        prop_assert!(node.difficulty <= MAX_DIFFICULTY);
                    }
                }
            }
        }
    }
}
