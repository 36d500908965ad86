use bevy::prelude::*;

use crate::engine::session::StellarMapSession;

/// One simulation step per rendered frame.
pub fn advance_session(time: Res<Time>, mut session: ResMut<StellarMapSession>) {
    session.tick(time.delta_secs());
}
