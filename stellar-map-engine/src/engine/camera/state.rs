use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera choreography phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CameraState {
    #[default]
    IntroAnimation,
    Free,
    ZoomingIn,
    DetailView,
    MovingToHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("camera cannot move from {from} to {to}")]
pub struct TransitionError {
    pub from: CameraState,
    pub to: CameraState,
}

impl CameraState {
    pub const ALL: [CameraState; 5] = [
        CameraState::IntroAnimation,
        CameraState::Free,
        CameraState::ZoomingIn,
        CameraState::DetailView,
        CameraState::MovingToHome,
    ];

    /// Edges of the choreography graph. Self-loops are not transitions.
    pub fn can_transition_to(self, next: CameraState) -> bool {
        use CameraState::*;
        matches!(
            (self, next),
            (IntroAnimation, Free)
                | (Free, ZoomingIn)
                | (Free, MovingToHome)
                | (ZoomingIn, DetailView)
                | (ZoomingIn, MovingToHome)
                | (DetailView, ZoomingIn)
                | (DetailView, MovingToHome)
                | (MovingToHome, Free)
        )
    }

    pub fn check_transition(self, next: CameraState) -> Result<(), TransitionError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }

    /// User orbit controls respond only in these states.
    pub fn controls_enabled(self) -> bool {
        matches!(self, CameraState::Free | CameraState::DetailView)
    }

    /// States that only make sense with a selected node.
    pub fn requires_selection(self) -> bool {
        matches!(self, CameraState::ZoomingIn | CameraState::DetailView)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CameraState::IntroAnimation => "INTRO_ANIMATION",
            CameraState::Free => "FREE",
            CameraState::ZoomingIn => "ZOOMING_IN",
            CameraState::DetailView => "DETAIL_VIEW",
            CameraState::MovingToHome => "MOVING_TO_HOME",
        }
    }
}

impl std::fmt::Display for CameraState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    #[test]
    fn every_state_is_reachable_from_intro() {
        let mut seen = HashSet::from([CameraState::IntroAnimation]);
        let mut queue = VecDeque::from([CameraState::IntroAnimation]);
        while let Some(state) = queue.pop_front() {
            for next in CameraState::ALL {
                if state.can_transition_to(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(seen.len(), CameraState::ALL.len());
    }

    #[test]
    fn only_listed_edges_are_legal() {
        use CameraState::*;
        let expected = HashSet::from([
            (IntroAnimation, Free),
            (Free, ZoomingIn),
            (Free, MovingToHome),
            (ZoomingIn, DetailView),
            (ZoomingIn, MovingToHome),
            (DetailView, ZoomingIn),
            (DetailView, MovingToHome),
            (MovingToHome, Free),
        ]);

        for from in CameraState::ALL {
            for to in CameraState::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    expected.contains(&(from, to)),
                    "{from} -> {to}"
                );
                assert_eq!(from.check_transition(to).is_ok(), expected.contains(&(from, to)));
            }
        }

        let into_detail: Vec<_> = CameraState::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(DetailView))
            .collect();
        assert_eq!(into_detail, [ZoomingIn]);
    }

    #[test]
    fn intro_is_never_reentered() {
        for state in CameraState::ALL {
            assert!(!state.can_transition_to(CameraState::IntroAnimation));
            assert!(!state.can_transition_to(state));
        }
    }

    #[test]
    fn home_is_reachable_from_every_post_intro_state_except_home() {
        for state in [CameraState::Free, CameraState::ZoomingIn, CameraState::DetailView] {
            assert!(state.can_transition_to(CameraState::MovingToHome));
        }
        let err = CameraState::MovingToHome
            .check_transition(CameraState::ZoomingIn)
            .unwrap_err();
        assert_eq!(err.to_string(), "camera cannot move from MOVING_TO_HOME to ZOOMING_IN");
    }

    #[test]
    fn states_serialise_in_screaming_case() {
        let json = serde_json::to_string(&CameraState::DetailView).unwrap();
        assert_eq!(json, "\"DETAIL_VIEW\"");
        for state in CameraState::ALL {
            assert_eq!(serde_json::to_value(state).unwrap(), state.as_str());
        }
    }
}
