//! Self-expiring warning text.

/// Number of ticks a warning stays visible; it is cleared on the tick after.
pub const WARNING_LIFETIME_FRAMES: u32 = 100;

/// Warning text that clears itself after [`WARNING_LIFETIME_FRAMES`] ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WarningMessage {
    text: String,
    age_in_frames: u32,
    active: bool,
}

impl WarningMessage {
    /// Creates an empty, inactive warning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text and restarts the countdown.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.age_in_frames = 0;
        self.active = true;
    }

    /// Ages the warning by one frame, clearing it once it outlives its lifetime.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }

        self.age_in_frames = self.age_in_frames.saturating_add(1);
        if self.age_in_frames > WARNING_LIFETIME_FRAMES {
            self.text.clear();
            self.active = false;
        }
    }

    /// Current text; empty when no warning is shown.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Frames elapsed since the text was last set.
    #[must_use]
    pub const fn age_in_frames(&self) -> u32 {
        self.age_in_frames
    }

    /// Whether the warning outlived its lifetime and was cleared.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        !self.active && self.age_in_frames > WARNING_LIFETIME_FRAMES
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}
