use bevy::prelude::*;
use constants::speed::{MAX_SPEED_FACTOR, SPEED_STEP};
use serde::{Deserialize, Serialize};

use crate::engine::session::{SessionError, StellarMapSession};

/// Navigation commands that do not need a target picked in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapCommand {
    GoHome,
    ExitDetail,
    FocusAnchor,
    /// Relative change to the speed factor.
    NudgeSpeed(f32),
}

/// Event fired when a map command is requested from the keyboard.
#[derive(Event, Debug, Clone, Copy)]
pub struct MapCommandEvent {
    pub command: MapCommand,
}

/// Run one command against the session.
pub fn apply_map_command(
    session: &mut StellarMapSession,
    command: MapCommand,
) -> Result<(), SessionError> {
    match command {
        MapCommand::GoHome => session.go_home(),
        MapCommand::ExitDetail => session.exit_detail(),
        MapCommand::FocusAnchor => session.focus_anchor(),
        MapCommand::NudgeSpeed(delta) => {
            let next = (session.speed().factor() + delta).clamp(0.0, MAX_SPEED_FACTOR);
            session.set_speed_factor(next)
        }
    }
}

pub fn handle_map_commands(
    mut events: EventReader<MapCommandEvent>,
    mut session: ResMut<StellarMapSession>,
) {
    for event in events.read() {
        match apply_map_command(&mut session, event.command) {
            Ok(()) => debug!("Map command {:?}", event.command),
            Err(err) => info!("Map command {:?} ignored: {}", event.command, err),
        }
    }
}

/// Keyboard shortcuts for navigation (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_map_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut command_events: EventWriter<MapCommandEvent>,
) {
    let mut send = |command| {
        command_events.write(MapCommandEvent { command });
    };

    if keyboard.just_pressed(KeyCode::KeyH) {
        send(MapCommand::GoHome);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        send(MapCommand::ExitDetail);
    }
    if keyboard.just_pressed(KeyCode::Digit0) {
        send(MapCommand::FocusAnchor);
    }
    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        send(MapCommand::NudgeSpeed(SPEED_STEP));
    }
    if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        send(MapCommand::NudgeSpeed(-SPEED_STEP));
    }
}

/// Placeholder system for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_map_keyboard_shortcuts() {
    // The host page drives navigation over RPC.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::MapSettings;

    #[test]
    fn nudge_speed_is_clamped() {
        let mut session = StellarMapSession::new(MapSettings::default());

        apply_map_command(&mut session, MapCommand::NudgeSpeed(-10.0)).unwrap();
        assert_eq!(session.speed().factor(), 0.0);

        apply_map_command(&mut session, MapCommand::NudgeSpeed(100.0)).unwrap();
        assert_eq!(session.speed().factor(), MAX_SPEED_FACTOR);
    }

    #[test]
    fn navigation_is_locked_during_intro() {
        let mut session = StellarMapSession::new(MapSettings::default());
        assert!(matches!(
            apply_map_command(&mut session, MapCommand::GoHome),
            Err(SessionError::InputLocked(_))
        ));
    }
}
