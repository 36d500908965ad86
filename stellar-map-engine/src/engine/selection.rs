use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use super::hierarchy::{Hierarchy, constellation_key};
use super::registry::PositionRegistry;

/// What the free camera is centred on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Focus {
    #[default]
    Anchor,
    Family {
        family: String,
    },
    Constellation {
        family: String,
        constellation: String,
    },
}

impl Focus {
    /// Live world position of the focus target, if it has been recorded.
    pub fn position(&self, registry: &PositionRegistry, anchor: Vec3) -> Option<Vec3> {
        match self {
            Focus::Anchor => Some(anchor),
            Focus::Family { family } => registry.family(family),
            Focus::Constellation {
                family,
                constellation,
            } => registry.constellation(&constellation_key(family, constellation)),
        }
    }

    pub fn exists_in(&self, hierarchy: &Hierarchy) -> bool {
        match self {
            Focus::Anchor => true,
            Focus::Family { family } => hierarchy.family(family).is_some(),
            Focus::Constellation {
                family,
                constellation,
            } => hierarchy.constellation(family, constellation).is_some(),
        }
    }
}

/// Selected node, hovered node and grouping focus.
///
/// Selection and hover are stored as node ids and resolved against the
/// current hierarchy on read.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: Option<String>,
    hovered: Option<String>,
    focus: Focus,
}

impl SelectionModel {
    pub fn selected_node(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select_node(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear_selection(&mut self) -> Option<String> {
        self.selected.take()
    }

    pub fn hovered_node(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Returns true when the hovered node actually changed.
    pub fn set_hovered(&mut self, id: Option<&str>) -> bool {
        if self.hovered.as_deref() == id {
            return false;
        }
        self.hovered = id.map(str::to_owned);
        true
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }
}
