//! Keyboard and touch normalization
//!
//! Browser events arrive asynchronously between animation frames. They are
//! folded into an `InputTracker`, which is sampled once per tick.

use crate::sim::TickInput;

/// Horizontal third of the screen a touch landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchRegion {
    Left,
    Shoot,
    Right,
}

impl TouchRegion {
    pub fn from_x(x: f32, width: f32) -> Self {
        if x < width / 3.0 {
            TouchRegion::Left
        } else if x > width * 2.0 / 3.0 {
            TouchRegion::Right
        } else {
            TouchRegion::Shoot
        }
    }
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Shoot,
    Restart,
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " => Some(Key::Shoot),
            "r" | "R" => Some(Key::Restart),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputTracker {
    left_held: bool,
    right_held: bool,
    shoot_held: bool,
    // One-shot latches, cleared by `snapshot`
    shoot_pressed: bool,
    restart_pressed: bool,
    touches: Vec<(i32, TouchRegion)>,
    autopilot: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat is ignored for one-shot keys.
    pub fn press_key(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Shoot => {
                if !self.shoot_held {
                    self.shoot_pressed = true;
                }
                self.shoot_held = true;
            }
            Key::Restart => self.restart_pressed = true,
            Key::Autopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
        }
    }

    pub fn release_key(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Shoot => self.shoot_held = false,
            Key::Restart | Key::Autopilot => {}
        }
    }

    /// A new touch point. Touches hold until released; a middle-third press
    /// fires every tick it is held and, after game over, restarts once.
    pub fn touch_start(&mut self, id: i32, region: TouchRegion) {
        self.touches.retain(|(t, _)| *t != id);
        self.touches.push((id, region));
        if region == TouchRegion::Shoot {
            self.restart_pressed = true;
        }
    }

    pub fn touch_end(&mut self, id: i32) {
        self.touches.retain(|(t, _)| *t != id);
    }

    /// Drop every held key and touch (focus lost, so no release events will arrive)
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
        self.shoot_held = false;
        self.touches.clear();
    }

    /// Input for the next tick; one-shot latches are consumed
    pub fn snapshot(&mut self) -> TickInput {
        let touching = |region| self.touches.iter().any(|(_, r)| *r == region);
        let input = TickInput {
            left: self.left_held || touching(TouchRegion::Left),
            right: self.right_held || touching(TouchRegion::Right),
            shoot: self.shoot_pressed || touching(TouchRegion::Shoot),
            restart: self.restart_pressed,
            autopilot: self.autopilot,
        };
        self.shoot_pressed = false;
        self.restart_pressed = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_regions() {
        assert_eq!(TouchRegion::from_x(10.0, 1200.0), TouchRegion::Left);
        assert_eq!(TouchRegion::from_x(600.0, 1200.0), TouchRegion::Shoot);
        assert_eq!(TouchRegion::from_x(1190.0, 1200.0), TouchRegion::Right);
        assert_eq!(TouchRegion::from_x(400.0, 1200.0), TouchRegion::Shoot);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key_name(" "), Some(Key::Shoot));
        assert_eq!(Key::from_key_name("R"), Some(Key::Restart));
        assert_eq!(Key::from_key_name("Escape"), None);
    }

    #[test]
    fn test_held_keys_persist_across_snapshots() {
        let mut input = InputTracker::new();
        input.press_key(Key::Left);
        assert!(input.snapshot().left);
        assert!(input.snapshot().left);
        input.release_key(Key::Left);
        assert!(!input.snapshot().left);
    }

    #[test]
    fn test_shoot_once_per_press() {
        let mut input = InputTracker::new();
        input.press_key(Key::Shoot);
        // Keyboard auto-repeat
        input.press_key(Key::Shoot);
        assert!(input.snapshot().shoot);
        input.press_key(Key::Shoot);
        assert!(!input.snapshot().shoot);

        input.release_key(Key::Shoot);
        input.press_key(Key::Shoot);
        assert!(input.snapshot().shoot);
    }

    #[test]
    fn test_touch_hold_and_release() {
        let mut input = InputTracker::new();
        input.touch_start(1, TouchRegion::Right);
        input.touch_start(2, TouchRegion::Shoot);

        let first = input.snapshot();
        assert!(first.right && first.shoot && first.restart);
        assert!(!first.left);

        let second = input.snapshot();
        assert!(second.right && second.shoot);
        assert!(!second.restart);

        input.touch_end(1);
        assert!(!input.snapshot().right);
    }

    #[test]
    fn test_held_shoot_touch_fires_every_tick() {
        let mut input = InputTracker::new();
        input.touch_start(1, TouchRegion::Shoot);
        let shots: Vec<bool> = (0..3).map(|_| input.snapshot().shoot).collect();
        assert_eq!(shots, vec![true, true, true]);

        input.touch_end(1);
        assert!(!input.snapshot().shoot);
    }

    #[test]
    fn test_release_all_drops_held_input() {
        let mut input = InputTracker::new();
        input.press_key(Key::Left);
        input.press_key(Key::Shoot);
        input.touch_start(3, TouchRegion::Right);
        input.touch_start(4, TouchRegion::Shoot);
        input.snapshot();

        input.release_all();
        let after = input.snapshot();
        assert!(!after.left && !after.right && !after.shoot);

        // Shoot key counts as a fresh press again
        input.press_key(Key::Shoot);
        assert!(input.snapshot().shoot);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut input = InputTracker::new();
        input.press_key(Key::Autopilot);
        assert!(input.snapshot().autopilot);
        input.press_key(Key::Autopilot);
        assert!(!input.snapshot().autopilot);
    }
}
