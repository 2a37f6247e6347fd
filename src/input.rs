use macroquad::prelude::*;

use crate::game::Action;

/// Everything the game needs from one frame of input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// One entry per key pressed this frame; unmapped keys are `None` but
    /// still count as a press (they restart a finished game). The backend
    /// reports same-frame presses unordered, so they are applied in
    /// `press_rank` order.
    pub presses: Vec<Option<Action>>,
    pub soft_drop_held: bool,
    pub quit: bool,
}

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Space => Some(Action::TogglePause),
        KeyCode::W | KeyCode::Up => Some(Action::Rotate),
        KeyCode::A | KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::D | KeyCode::Right => Some(Action::MoveRight),
        _ => None,
    }
}

pub fn is_quit_key(key: KeyCode) -> bool {
    key == KeyCode::Escape
}

pub fn is_soft_drop_key(key: KeyCode) -> bool {
    matches!(key, KeyCode::S | KeyCode::Down)
}

/// Fixed order for presses landing in the same frame: pause, rotate, left,
/// right, then unmapped keys.
pub fn press_rank(action: Option<Action>) -> u8 {
    match action {
        Some(Action::TogglePause) => 0,
        Some(Action::Rotate) => 1,
        Some(Action::MoveLeft) => 2,
        Some(Action::MoveRight) => 3,
        None => 4,
    }
}

/// Builds a frame from the keys that went down and the keys held.
pub fn frame_from_keys(
    pressed: impl IntoIterator<Item = KeyCode>,
    held: impl IntoIterator<Item = KeyCode>,
) -> FrameInput {
    let mut input = FrameInput::default();
    for key in pressed {
        if is_quit_key(key) {
            input.quit = true;
            continue;
        }
        input.presses.push(action_for_key(key));
    }
    input.presses.sort_by_key(|&action| press_rank(action));
    input.soft_drop_held = held.into_iter().any(is_soft_drop_key);
    input
}

/// Drains this frame's key presses and samples the held keys.
/// Requires `prevent_quit()` at startup for window close to reach us.
pub fn poll() -> FrameInput {
    let mut input = frame_from_keys(get_keys_pressed(), get_keys_down());
    input.quit |= is_quit_requested();
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings() {
        assert_eq!(action_for_key(KeyCode::Space), Some(Action::TogglePause));
        assert_eq!(action_for_key(KeyCode::W), Some(Action::Rotate));
        assert_eq!(action_for_key(KeyCode::Left), Some(Action::MoveLeft));
        assert_eq!(action_for_key(KeyCode::D), Some(Action::MoveRight));
        assert_eq!(action_for_key(KeyCode::S), None);
        assert_eq!(action_for_key(KeyCode::Q), None);
    }

    #[test]
    fn same_frame_presses_have_a_fixed_order() {
        let orders = [
            vec![KeyCode::D, KeyCode::Q, KeyCode::W, KeyCode::Space, KeyCode::A],
            vec![KeyCode::A, KeyCode::Space, KeyCode::D, KeyCode::W, KeyCode::Q],
            vec![KeyCode::Q, KeyCode::A, KeyCode::W, KeyCode::D, KeyCode::Space],
        ];
        for keys in orders {
            let frame = frame_from_keys(keys, []);
            assert_eq!(
                frame.presses,
                vec![
                    Some(Action::TogglePause),
                    Some(Action::Rotate),
                    Some(Action::MoveLeft),
                    Some(Action::MoveRight),
                    None,
                ]
            );
            assert!(!frame.quit);
        }
    }

    #[test]
    fn escape_quits_and_held_down_soft_drops() {
        let frame = frame_from_keys([KeyCode::Escape], [KeyCode::Down, KeyCode::A]);
        assert!(frame.quit);
        assert!(frame.presses.is_empty());
        assert!(frame.soft_drop_held);
    }

    #[test]
    fn quit_and_soft_drop_keys() {
        assert!(is_quit_key(KeyCode::Escape));
        assert!(!is_quit_key(KeyCode::Space));
        assert!(is_soft_drop_key(KeyCode::Down));
        assert!(is_soft_drop_key(KeyCode::S));
        assert!(!is_soft_drop_key(KeyCode::A));
    }
}
