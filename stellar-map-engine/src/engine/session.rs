use bevy::prelude::*;
use constants::render_settings::{CONSTELLATION_MARKER_RADIUS, FAMILY_MARKER_RADIUS, NODE_PICK_RADIUS};
use constants::spatial::ORBIT_TRAIL_SEGMENTS;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::camera::controller::{CameraConfig, CameraController, CameraTargets, OrbitInput};
use super::camera::state::{CameraState, TransitionError};
use super::hierarchy::{
    DataWarning, GroupingMatch, Hierarchy, HierarchyError, Node, build_hierarchy,
    constellation_key,
};
use super::orbit::{OrbitLevel, OrbitTrail, OrbitalSystem, SpatialConfig, TiltSource};
use super::overview::{OverviewLayout, build_overview};
use super::registry::PositionRegistry;
use super::selection::{Focus, SelectionModel};
use super::speed::{SpeedControl, SpeedError};

/// Tunables for a session. Defaults come from the `constants` crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub spatial: SpatialConfig,
    pub camera: CameraConfig,
    pub tilt_source: TiltSource,
    pub initial_speed: f32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            spatial: SpatialConfig::default(),
            camera: CameraConfig::default(),
            tilt_source: TiltSource::default(),
            initial_speed: constants::speed::DEFAULT_SPEED_FACTOR,
        }
    }
}

/// Screen-space pointer attached to hover notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerInfo {
    pub x: f32,
    pub y: f32,
}

/// Outward notifications, drained once per frame by the host bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    NodeHover {
        node: Option<Node>,
        pointer: Option<PointerInfo>,
    },
    NodeClick {
        node: Node,
    },
    CameraStateChanged {
        from: CameraState,
        to: CameraState,
    },
}

impl MapEvent {
    pub fn method(&self) -> &'static str {
        match self {
            MapEvent::NodeHover { .. } => "node_hover",
            MapEvent::NodeClick { .. } => "node_click",
            MapEvent::CameraStateChanged { .. } => "camera_state_changed",
        }
    }
}

/// Anything in the scene a pointer can land on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapBody {
    Family {
        family: String,
    },
    Constellation {
        family: String,
        constellation: String,
    },
    Node {
        id: String,
    },
}

impl MapBody {
    pub fn level(&self) -> OrbitLevel {
        match self {
            MapBody::Family { .. } => OrbitLevel::Family,
            MapBody::Constellation { .. } => OrbitLevel::Constellation,
            MapBody::Node { .. } => OrbitLevel::Node,
        }
    }
}

/// Body with its live pick sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub body: MapBody,
    pub position: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("unknown node `{0}`")]
    UnknownNode(String),
    #[error("unknown family `{0}`")]
    UnknownFamily(String),
    #[error("unknown constellation `{constellation}` in family `{family}`")]
    UnknownConstellation {
        family: String,
        constellation: String,
    },
    #[error("input is ignored during {0}")]
    InputLocked(CameraState),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("speed factor is held at 0 while a node is in view")]
    SpeedOverridden,
    #[error(transparent)]
    Speed(#[from] SpeedError),
}

/// The whole map: hierarchy, orbits, registry, selection, camera and speed.
///
/// Bevy systems call [`Self::tick`] once per frame and route user commands
/// through the methods below. Within a tick the order is fixed: speed is
/// read, pivots advance, the registry is written, then the camera reads it.
#[derive(Resource)]
pub struct StellarMapSession {
    settings: MapSettings,
    hierarchy: Hierarchy,
    orbits: OrbitalSystem,
    registry: PositionRegistry,
    selection: SelectionModel,
    camera: CameraController,
    speed: SpeedControl,
    events: Vec<MapEvent>,
    generation: u64,
}

impl Default for StellarMapSession {
    fn default() -> Self {
        Self::new(MapSettings::default())
    }
}

impl StellarMapSession {
    pub fn new(settings: MapSettings) -> Self {
        Self {
            hierarchy: Hierarchy::default(),
            orbits: OrbitalSystem::empty(settings.camera.anchor),
            registry: PositionRegistry::default(),
            selection: SelectionModel::default(),
            camera: CameraController::new(settings.camera),
            speed: SpeedControl::new(settings.initial_speed),
            events: Vec::new(),
            generation: 0,
            settings,
        }
    }

    pub fn with_hierarchy(settings: MapSettings, hierarchy: Hierarchy) -> Self {
        let mut session = Self::new(settings);
        session.reload(hierarchy);
        session
    }

    // --- reads -----------------------------------------------------------

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn registry(&self) -> &PositionRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    pub fn anchor(&self) -> Vec3 {
        self.settings.camera.anchor
    }

    /// Bumped on every reload so scene entities know to respawn.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_node(&self) -> Option<&Node> {
        let id = self.selection.selected_node()?;
        self.hierarchy.find_node(id).map(|location| location.node)
    }

    pub fn hovered_node(&self) -> Option<&Node> {
        let id = self.selection.hovered_node()?;
        self.hierarchy.find_node(id).map(|location| location.node)
    }

    pub fn search_groupings(&self, query: &str) -> Vec<GroupingMatch> {
        self.hierarchy.search_groupings(query)
    }

    pub fn list_nodes(&self) -> Vec<&Node> {
        self.hierarchy.list_nodes()
    }

    pub fn overview(&self) -> OverviewLayout {
        build_overview(&self.hierarchy, &self.registry)
    }

    pub fn orbit_trails(&self) -> Vec<OrbitTrail> {
        self.orbits.trails(ORBIT_TRAIL_SEGMENTS)
    }

    /// Every pickable body at its current position.
    pub fn bodies(&self) -> Vec<BodySnapshot> {
        let mut bodies = Vec::new();
        for family in self.hierarchy.families() {
            if let Some(position) = self.registry.family(&family.name) {
                bodies.push(BodySnapshot {
                    body: MapBody::Family {
                        family: family.name.clone(),
                    },
                    position,
                    radius: FAMILY_MARKER_RADIUS,
                });
            }
            for constellation in &family.constellations {
                let key = constellation_key(&family.name, &constellation.name);
                if let Some(position) = self.registry.constellation(&key) {
                    bodies.push(BodySnapshot {
                        body: MapBody::Constellation {
                            family: family.name.clone(),
                            constellation: constellation.name.clone(),
                        },
                        position,
                        radius: CONSTELLATION_MARKER_RADIUS,
                    });
                }
                for node in &constellation.nodes {
                    if let Some(position) = self.registry.node(&node.id) {
                        bodies.push(BodySnapshot {
                            body: MapBody::Node {
                                id: node.id.clone(),
                            },
                            position,
                            radius: NODE_PICK_RADIUS,
                        });
                    }
                }
            }
        }
        bodies
    }

    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    // --- frame -----------------------------------------------------------

    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.orbits.advance(self.speed.factor(), dt);
        self.orbits.record_positions(&mut self.registry);

        let anchor = self.anchor();
        let targets = CameraTargets {
            focus: self
                .selection
                .focus()
                .position(&self.registry, anchor)
                .unwrap_or(anchor),
            node: self
                .selection
                .selected_node()
                .and_then(|id| self.registry.node(id)),
        };

        let from = self.camera.state();
        if let Some(to) = self.camera.update(&targets) {
            self.events.push(MapEvent::CameraStateChanged { from, to });
        }
    }

    pub fn apply_orbit_input(&mut self, input: &OrbitInput) -> bool {
        self.camera.apply_input(input)
    }

    // --- commands --------------------------------------------------------

    fn ensure_input_allowed(&self) -> Result<(), SessionError> {
        match self.camera.state() {
            CameraState::IntroAnimation => Err(SessionError::InputLocked(CameraState::IntroAnimation)),
            _ => Ok(()),
        }
    }

    fn enter(&mut self, next: CameraState) -> Result<(), SessionError> {
        let from = self.camera.state();
        self.camera.transition(next)?;
        self.events.push(MapEvent::CameraStateChanged { from, to: next });
        Ok(())
    }

    fn restore_speed_if_overridden(&mut self) {
        if self.speed.is_overridden() {
            self.speed.restore();
            debug!("Speed restored to {}", self.speed.factor());
        }
    }

    /// Fly to `id` and inspect it. Motion stops until the camera goes home.
    pub fn focus_on_node(&mut self, id: &str) -> Result<(), SessionError> {
        self.ensure_input_allowed()?;
        if self.hierarchy.find_node(id).is_none() {
            warn!("focus_on_node: unknown node `{}`", id);
            return Err(SessionError::UnknownNode(id.to_owned()));
        }
        if self.selection.selected_node() == Some(id) && self.camera.state().requires_selection() {
            debug!("Node `{}` already in view", id);
            return Ok(());
        }

        if self.camera.state() != CameraState::ZoomingIn {
            self.enter(CameraState::ZoomingIn)?;
        }
        if !self.speed.is_overridden() {
            self.speed.override_factor();
        }
        self.selection.select_node(id);
        info!("Focusing node `{}`", id);
        Ok(())
    }

    /// Pointer click on a node: zoom, and notify if the zoom was accepted.
    pub fn click_node(&mut self, id: &str) -> Result<(), SessionError> {
        self.ensure_input_allowed()?;
        let node = self
            .hierarchy
            .find_node(id)
            .map(|location| location.node.clone())
            .ok_or_else(|| SessionError::UnknownNode(id.to_owned()))?;
        // The click is reported ahead of the camera change it causes, and
        // only if the focus was accepted.
        let mark = self.events.len();
        self.focus_on_node(id)?;
        self.events.insert(mark, MapEvent::NodeClick { node });
        Ok(())
    }

    /// Pointer click on any body. Grouping clicks only move the focus.
    pub fn click_body(&mut self, body: &MapBody) -> Result<(), SessionError> {
        match body {
            MapBody::Node { id } => self.click_node(id),
            MapBody::Family { family } => self.focus_family(family),
            MapBody::Constellation {
                family,
                constellation,
            } => self.focus_constellation(family, constellation),
        }
    }

    /// Pointer moved over `id` (or off every node). Emits only on change.
    pub fn hover_node(
        &mut self,
        id: Option<&str>,
        pointer: Option<PointerInfo>,
    ) -> Result<(), SessionError> {
        self.ensure_input_allowed()?;
        let id = id.filter(|id| self.hierarchy.find_node(id).is_some());
        if self.selection.set_hovered(id) {
            let node = self.hovered_node().cloned();
            self.events.push(MapEvent::NodeHover { node, pointer });
        }
        Ok(())
    }

    /// Return to the home pose. Clears the selection and the focus.
    pub fn go_home(&mut self) -> Result<(), SessionError> {
        self.ensure_input_allowed()?;
        if self.camera.state() != CameraState::MovingToHome {
            self.enter(CameraState::MovingToHome)?;
        }
        self.selection.clear_selection();
        self.selection.set_focus(Focus::Anchor);
        self.restore_speed_if_overridden();
        Ok(())
    }

    /// Leave the node being inspected. A no-op when nothing is selected.
    pub fn exit_detail(&mut self) -> Result<(), SessionError> {
        self.ensure_input_allowed()?;
        if self.selection.selected_node().is_none() {
            return Ok(());
        }
        self.go_home()
    }

    pub fn set_speed_factor(&mut self, value: f32) -> Result<(), SessionError> {
        if self.speed.is_overridden() {
            warn!("Ignoring speed change to {} while motion is held", value);
            return Err(SessionError::SpeedOverridden);
        }
        self.speed.set(value)?;
        Ok(())
    }

    pub fn set_focus(&mut self, focus: Focus) -> Result<(), SessionError> {
        self.ensure_input_allowed()?;
        match &focus {
            Focus::Anchor => {}
            Focus::Family { family } => {
                if self.hierarchy.family(family).is_none() {
                    return Err(SessionError::UnknownFamily(family.clone()));
                }
            }
            Focus::Constellation {
                family,
                constellation,
            } => {
                let Some(found) = self.hierarchy.family(family) else {
                    return Err(SessionError::UnknownFamily(family.clone()));
                };
                if found.constellation(constellation).is_none() {
                    return Err(SessionError::UnknownConstellation {
                        family: family.clone(),
                        constellation: constellation.clone(),
                    });
                }
            }
        }
        debug!("Focus -> {:?}", focus);
        self.selection.set_focus(focus);
        Ok(())
    }

    pub fn focus_family(&mut self, family: &str) -> Result<(), SessionError> {
        self.set_focus(Focus::Family {
            family: family.to_owned(),
        })
    }

    pub fn focus_constellation(
        &mut self,
        family: &str,
        constellation: &str,
    ) -> Result<(), SessionError> {
        self.set_focus(Focus::Constellation {
            family: family.to_owned(),
            constellation: constellation.to_owned(),
        })
    }

    pub fn focus_anchor(&mut self) -> Result<(), SessionError> {
        self.set_focus(Focus::Anchor)
    }

    /// Build a hierarchy from a raw snapshot and swap it in.
    pub fn load_snapshot(&mut self, snapshot: &Value) -> Result<Vec<DataWarning>, HierarchyError> {
        let report = build_hierarchy(snapshot)?;
        for warning in &report.warnings {
            warn!("Hierarchy data: {}", warning);
        }
        self.reload(report.hierarchy);
        Ok(report.warnings)
    }

    /// Swap the tree. Positions are rebuilt from scratch; selection, hover
    /// and focus are kept only if their targets survived.
    pub fn reload(&mut self, hierarchy: Hierarchy) {
        self.orbits = OrbitalSystem::build(
            &hierarchy,
            &self.settings.spatial,
            self.settings.tilt_source,
            self.anchor(),
        );
        self.hierarchy = hierarchy;
        self.registry.clear();
        self.orbits.record_positions(&mut self.registry);
        self.generation += 1;

        info!(
            "Hierarchy loaded: {} families, {} nodes",
            self.hierarchy.families().len(),
            self.hierarchy.node_count()
        );

        let selection_lost = self
            .selection
            .selected_node()
            .is_some_and(|id| self.hierarchy.find_node(id).is_none());
        if selection_lost {
            if let Some(id) = self.selection.clear_selection() {
                warn!("Selected node `{}` vanished on reload", id);
            }
            if self.camera.state().requires_selection() {
                if let Err(err) = self.enter(CameraState::MovingToHome) {
                    error!("Could not leave {} after reload: {}", self.camera.state(), err);
                }
            }
            self.restore_speed_if_overridden();
        }

        let hover_lost = self
            .selection
            .hovered_node()
            .is_some_and(|id| self.hierarchy.find_node(id).is_none());
        if hover_lost {
            self.selection.set_hovered(None);
            self.events.push(MapEvent::NodeHover {
                node: None,
                pointer: None,
            });
        }

        if !self.selection.focus().exists_in(&self.hierarchy) {
            self.selection.set_focus(Focus::Anchor);
        }
    }
}
