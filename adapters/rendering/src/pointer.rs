//! Conversion of polled mouse state into pointer transitions.

use glam::Vec2;

/// Transition of the primary pointer button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The button went down.
    Pressed {
        /// Cursor position at the press.
        position: Vec2,
    },
    /// The cursor moved while the button was held.
    Dragged {
        /// New cursor position.
        position: Vec2,
        /// Movement since the previous pointer event.
        delta: Vec2,
    },
    /// The button went up.
    Released {
        /// Cursor position at the release.
        position: Vec2,
    },
}

impl PointerEvent {
    /// Cursor position carried by the event.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        match *self {
            Self::Pressed { position }
            | Self::Dragged { position, .. }
            | Self::Released { position } => position,
        }
    }
}

/// Tracks the primary button across frames and reports its transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    pressed: bool,
    last_position: Option<Vec2>,
}

impl PointerTracker {
    /// Creates a tracker that assumes the button starts released.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: false,
            last_position: None,
        }
    }

    /// Whether the tracker believes the button is held.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feeds one polled sample and appends the resulting transitions to `out`.
    ///
    /// A held button only produces a drag when the cursor actually moved.
    pub fn update(&mut self, position: Vec2, button_down: bool, out: &mut Vec<PointerEvent>) {
        match (self.pressed, button_down) {
            (false, true) => {
                self.pressed = true;
                out.push(PointerEvent::Pressed { position });
            }
            (true, true) => {
                let previous = self.last_position.unwrap_or(position);
                let delta = position - previous;
                if delta != Vec2::ZERO {
                    out.push(PointerEvent::Dragged { position, delta });
                }
            }
            (true, false) => {
                self.pressed = false;
                out.push(PointerEvent::Released { position });
            }
            (false, false) => {}
        }
        self.last_position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(samples: &[(Vec2, bool)]) -> Vec<PointerEvent> {
        let mut tracker = PointerTracker::new();
        let mut out = Vec::new();
        for &(position, down) in samples {
            tracker.update(position, down, &mut out);
        }
        out
    }

    #[test]
    fn hover_produces_no_events() {
        let events = replay(&[
            (Vec2::new(1.0, 1.0), false),
            (Vec2::new(5.0, 1.0), false),
        ]);
        assert!(events.is_empty());
    }

    #[test]
    fn press_drag_release_sequence() {
        let a = Vec2::new(10.0, 10.0);
        let b = Vec2::new(14.0, 7.0);
        let events = replay(&[(a, false), (a, true), (a, true), (b, true), (b, false)]);

        assert_eq!(
            events,
            vec![
                PointerEvent::Pressed { position: a },
                PointerEvent::Dragged {
                    position: b,
                    delta: Vec2::new(4.0, -3.0),
                },
                PointerEvent::Released { position: b },
            ]
        );
    }

    #[test]
    fn identical_samples_replay_identically() {
        let samples: Vec<(Vec2, bool)> = (0..20)
            .map(|step| (Vec2::new(step as f32, 0.0), (3..12).contains(&step)))
            .collect();

        assert_eq!(replay(&samples), replay(&samples));
        assert_eq!(replay(&samples).len(), 1 + 8 + 1);
    }

    #[test]
    fn tracker_reports_held_state() {
        let mut tracker = PointerTracker::new();
        let mut out = Vec::new();
        tracker.update(Vec2::ZERO, true, &mut out);
        assert!(tracker.is_pressed());
        tracker.update(Vec2::ZERO, false, &mut out);
        assert!(!tracker.is_pressed());
        assert_eq!(out.last().map(PointerEvent::position), Some(Vec2::ZERO));
    }
}
