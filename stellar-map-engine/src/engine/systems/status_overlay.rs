use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::session::StellarMapSession;

/// Native-only corner readout.
#[derive(Component)]
pub struct StatusText;

pub fn spawn_status_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

pub fn status_text_update_system(
    session: Res<StellarMapSession>,
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or_default();
    let speed = session.speed();
    let held = if speed.is_overridden() { " (held)" } else { "" };
    let selected = session
        .selected_node()
        .map(|node| node.title.as_str())
        .unwrap_or("-");

    for mut text in &mut query {
        text.0 = format!(
            "{} | speed {:.1}{} | {} | FPS: {:.1}",
            session.camera_state(),
            speed.factor(),
            held,
            selected,
            fps
        );
    }
}
