/// Action bound to a keyboard shortcut while the map page is mounted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlayback,
}

/// Maps a DOM-style key code (`"Space"`, `"KeyA"`, ...) to an action.
pub fn action_for(code: &str) -> Option<KeyAction> {
    match code {
        "Space" => Some(KeyAction::TogglePlayback),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{action_for, KeyAction};

    #[test]
    fn only_space_is_bound() {
        assert_eq!(action_for("Space"), Some(KeyAction::TogglePlayback));
        assert_eq!(action_for("Enter"), None);
        assert_eq!(action_for("space"), None);
    }
}
