//! Keyboard input, from raw key events to game actions.
//!
//! The host collects a frame's worth of key events into an [`InputSnapshot`].
//! A [`KeyMap`] translates physical keys into the game's own action enum, and
//! an [`ActionState`] folds each snapshot into held / just-pressed /
//! just-released sets that systems query.
//!
//! Edges (just-pressed / just-released) are kept until a fixed tick has seen
//! them. A frame that runs no tick leaves them in place, and the next frame's
//! snapshot is merged on top.
//!
//! ```text
//! winit KeyCode events ──▶ InputSnapshot ──KeyMap──▶ ActionState<GameAction>
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use winit::keyboard::KeyCode;

/// Tracks the state of a set of inputs (keys or actions).
///
/// - `pressed`: currently held down
/// - `just_pressed`: pressed since the edges were last cleared
/// - `just_released`: released since the edges were last cleared
#[derive(Clone, Debug)]
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Returns `true` if the input is currently held down.
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    /// Returns `true` if the input was pressed this frame.
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input was released this frame.
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Returns `true` if anything is held.
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Clear edge state. Called once the edges have been observed.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse cursor position in window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: f32,
    pub y: f32,
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub down: bool,
}

/// Everything the host observed since the previous frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub key_events: Vec<KeyEvent>,
    pub cursor: CursorPosition,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key-down event.
    pub fn press(mut self, key: KeyCode) -> Self {
        self.key_events.push(KeyEvent { key, down: true });
        self
    }

    /// Append a key-up event.
    pub fn release(mut self, key: KeyCode) -> Self {
        self.key_events.push(KeyEvent { key, down: false });
        self
    }
}

/// One physical key bound to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding<A> {
    pub key: KeyCode,
    pub action: A,
}

/// Physical key → game action. Several keys may share an action.
///
/// Serialises as a list of `{ "key": "ArrowLeft", "action": "Left" }`
/// entries. If a key appears twice, the later entry wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap<A> {
    bindings: Vec<KeyBinding<A>>,
}

impl<A: Copy> KeyMap<A> {
    pub fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Bind `key` to `action`, replacing any existing binding for `key`.
    pub fn bind(&mut self, key: KeyCode, action: A) -> &mut Self {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.key == key) {
            log::warn!("key {:?} bound twice, keeping the later binding", key);
            existing.action = action;
        } else {
            self.bindings.push(KeyBinding { key, action });
        }
        self
    }

    /// The action bound to `key`, if any.
    pub fn action_for(&self, key: KeyCode) -> Option<A> {
        self.bindings
            .iter()
            .rev()
            .find(|binding| binding.key == key)
            .map(|binding| binding.action)
    }

    pub fn bindings(&self) -> &[KeyBinding<A>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Copy> Default for KeyMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Copy> FromIterator<(KeyCode, A)> for KeyMap<A> {
    fn from_iter<I: IntoIterator<Item = (KeyCode, A)>>(iter: I) -> Self {
        let mut map = KeyMap::new();
        for (key, action) in iter {
            map.bind(key, action);
        }
        map
    }
}

/// Held / just-pressed / just-released state for game actions.
#[derive(Debug, Clone)]
pub struct ActionState<A: Eq + Hash + Copy> {
    actions: Input<A>,
    cursor: CursorPosition,
    /// Set once a tick has run against the current edges.
    edges_seen: bool,
}

impl<A: Eq + Hash + Copy> ActionState<A> {
    pub fn new() -> Self {
        Self {
            actions: Input::new(),
            cursor: CursorPosition::default(),
            edges_seen: true,
        }
    }

    /// Fold one frame's snapshot in. Call exactly once per frame.
    ///
    /// Edges from earlier frames are only cleared if a tick consumed them
    /// (see [`ActionState::mark_consumed`]). Keys without a binding are
    /// ignored.
    pub fn apply(&mut self, snapshot: &InputSnapshot, keymap: &KeyMap<A>) {
        if self.edges_seen {
            self.actions.clear_just();
            self.edges_seen = false;
        }
        for event in &snapshot.key_events {
            let Some(action) = keymap.action_for(event.key) else {
                continue;
            };
            if event.down {
                self.actions.press(action);
            } else {
                self.actions.release(action);
            }
        }
        self.cursor = snapshot.cursor;
    }

    /// Record that at least one tick ran against the current edges, so the
    /// next [`apply`](ActionState::apply) may clear them.
    pub fn mark_consumed(&mut self) {
        self.edges_seen = true;
    }

    pub fn pressed(&self, action: A) -> bool {
        self.actions.pressed(action)
    }

    pub fn just_pressed(&self, action: A) -> bool {
        self.actions.just_pressed(action)
    }

    pub fn just_released(&self, action: A) -> bool {
        self.actions.just_released(action)
    }

    pub fn any_pressed(&self) -> bool {
        self.actions.any_pressed()
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }
}

impl<A: Eq + Hash + Copy> Default for ActionState<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Action {
        Left,
        Right,
    }

    fn keymap() -> KeyMap<Action> {
        [
            (KeyCode::ArrowLeft, Action::Left),
            (KeyCode::KeyA, Action::Left),
            (KeyCode::ArrowRight, Action::Right),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn input_press_release_cycle() {
        let mut input = Input::new();
        input.press(KeyCode::Space);
        assert!(input.pressed(KeyCode::Space));
        assert!(input.just_pressed(KeyCode::Space));

        input.clear_just();
        input.press(KeyCode::Space);
        assert!(!input.just_pressed(KeyCode::Space));

        input.release(KeyCode::Space);
        assert!(!input.pressed(KeyCode::Space));
        assert!(input.just_released(KeyCode::Space));
    }

    #[test]
    fn keymap_lookup() {
        let map = keymap();
        assert_eq!(map.action_for(KeyCode::KeyA), Some(Action::Left));
        assert_eq!(map.action_for(KeyCode::ArrowRight), Some(Action::Right));
        assert_eq!(map.action_for(KeyCode::Space), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn rebinding_replaces() {
        let mut map = keymap();
        map.bind(KeyCode::KeyA, Action::Right);
        assert_eq!(map.action_for(KeyCode::KeyA), Some(Action::Right));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn keymap_json_shape() {
        let json = r#"[{"key":"KeyD","action":"Right"},{"key":"KeyD","action":"Left"}]"#;
        let map: KeyMap<Action> = serde_json::from_str(json).unwrap();
        assert_eq!(map.action_for(KeyCode::KeyD), Some(Action::Left));
    }

    #[test]
    fn actions_follow_snapshots() {
        let map = keymap();
        let mut state = ActionState::new();

        state.apply(&InputSnapshot::new().press(KeyCode::KeyA).press(KeyCode::Space), &map);
        assert!(state.pressed(Action::Left));
        assert!(state.just_pressed(Action::Left));
        assert!(state.any_pressed());
        assert!(!state.pressed(Action::Right));

        // Held across an empty frame.
        state.mark_consumed();
        state.apply(&InputSnapshot::new(), &map);
        assert!(state.pressed(Action::Left));
        assert!(!state.just_pressed(Action::Left));

        state.mark_consumed();
        state.apply(&InputSnapshot::new().release(KeyCode::KeyA), &map);
        assert!(!state.pressed(Action::Left));
        assert!(state.just_released(Action::Left));
        assert!(!state.any_pressed());
    }

    #[test]
    fn edges_survive_frames_without_a_tick() {
        let map = keymap();
        let mut state = ActionState::new();

        state.apply(&InputSnapshot::new().press(KeyCode::ArrowRight), &map);
        // No tick ran, so the press is still fresh on the next frame.
        state.apply(&InputSnapshot::new().release(KeyCode::ArrowRight), &map);
        assert!(state.just_pressed(Action::Right));
        assert!(state.just_released(Action::Right));
        assert!(!state.pressed(Action::Right));

        state.mark_consumed();
        state.apply(&InputSnapshot::new(), &map);
        assert!(!state.just_pressed(Action::Right));
        assert!(!state.just_released(Action::Right));
    }

    #[test]
    fn cursor_is_copied_from_snapshot() {
        let mut state: ActionState<Action> = ActionState::new();
        let snapshot = InputSnapshot {
            cursor: CursorPosition { x: 3.0, y: 4.0 },
            ..Default::default()
        };
        state.apply(&snapshot, &keymap());
        assert_eq!(state.cursor(), CursorPosition { x: 3.0, y: 4.0 });
    }
}
