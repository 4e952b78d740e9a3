//! Key bindings.

use drms_core::Action;
use winit::keyboard::KeyCode;

/// Physical keys and the action each one triggers.
pub const BINDINGS: [(KeyCode, Action); 4] = [
    (KeyCode::KeyM, Action::CycleMultisample),
    (KeyCode::KeyD, Action::ToggleDualResolution),
    (KeyCode::KeyR, Action::CycleResolution),
    (KeyCode::Escape, Action::Quit),
];

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    BINDINGS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|&(_, action)| action)
}

/// Logs the help banner.
pub fn log_bindings() {
    log::info!("Controls:");
    for (key, action) in BINDINGS {
        log::info!("  {:<7} {action}", key_label(key));
    }
}

fn key_label(code: KeyCode) -> &'static str {
    match code {
        KeyCode::KeyM => "M",
        KeyCode::KeyD => "D",
        KeyCode::KeyR => "R",
        KeyCode::Escape => "Escape",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_map_to_actions() {
        assert_eq!(action_for_key(KeyCode::KeyM), Some(Action::CycleMultisample));
        assert_eq!(action_for_key(KeyCode::KeyD), Some(Action::ToggleDualResolution));
        assert_eq!(action_for_key(KeyCode::KeyR), Some(Action::CycleResolution));
        assert_eq!(action_for_key(KeyCode::Escape), Some(Action::Quit));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(action_for_key(KeyCode::KeyQ), None);
        assert_eq!(action_for_key(KeyCode::Space), None);
    }

    #[test]
    fn every_action_has_a_key() {
        for action in Action::ALL {
            assert!(BINDINGS.iter().any(|&(_, a)| a == action), "{action:?} unbound");
        }
    }
}
