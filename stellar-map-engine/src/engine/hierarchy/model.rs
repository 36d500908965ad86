use serde::Serialize;
use serde_json::{Map, Value};

/// Leaf entity of the map. Only `difficulty` feeds the layout, everything
/// else is carried for detail panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub title: String,
    pub difficulty: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constellation {
    pub name: String,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Family {
    pub name: String,
    pub constellations: Vec<Constellation>,
}

impl Family {
    pub fn constellation(&self, name: &str) -> Option<&Constellation> {
        self.constellations.iter().find(|c| c.name == name)
    }
}

/// Registry key for a constellation. Names are only unique within a family.
pub fn constellation_key(family: &str, constellation: &str) -> String {
    format!("{family}-{constellation}")
}

/// A node together with the grouping it hangs under.
#[derive(Debug, Clone, Copy)]
pub struct NodeLocation<'a> {
    pub family: &'a Family,
    pub constellation: &'a Constellation,
    pub node: &'a Node,
}

/// Result row of a grouping search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupingMatch {
    Family {
        family: String,
    },
    Constellation {
        family: String,
        constellation: String,
    },
}

/// Three-level tree: Family -> Constellation -> Node, in insertion order.
///
/// Built only through [`super::builder::build_hierarchy`], which guarantees
/// non-empty groupings and unique node ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    families: Vec<Family>,
}

impl Hierarchy {
    pub(crate) fn from_families(families: Vec<Family>) -> Self {
        Self { families }
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn family(&self, name: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn constellation(&self, family: &str, constellation: &str) -> Option<&Constellation> {
        self.family(family)?.constellation(constellation)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeLocation<'_>> {
        self.families.iter().flat_map(|family| {
            family.constellations.iter().flat_map(move |constellation| {
                constellation.nodes.iter().map(move |node| NodeLocation {
                    family,
                    constellation,
                    node,
                })
            })
        })
    }

    pub fn find_node(&self, id: &str) -> Option<NodeLocation<'_>> {
        self.nodes().find(|location| location.node.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Every node once, in tree order, for list views.
    pub fn list_nodes(&self) -> Vec<&Node> {
        let mut seen = std::collections::HashSet::new();
        self.nodes()
            .map(|location| location.node)
            .filter(|node| seen.insert(node.id.as_str()))
            .collect()
    }

    /// Case-insensitive substring match over family and constellation names.
    /// A constellation also matches through its family name. Families come
    /// first, then constellations, both in tree order.
    pub fn search_groupings(&self, query: &str) -> Vec<GroupingMatch> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let families = self
            .families
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .map(|f| GroupingMatch::Family {
                family: f.name.clone(),
            });

        let constellations = self.families.iter().flat_map(|f| {
            let needle = needle.clone();
            let family_hit = f.name.to_lowercase().contains(&needle);
            f.constellations
                .iter()
                .filter(move |c| family_hit || c.name.to_lowercase().contains(&needle))
                .map(move |c| GroupingMatch::Constellation {
                    family: f.name.clone(),
                    constellation: c.name.clone(),
                })
        });

        families.chain(constellations).collect()
    }
}
