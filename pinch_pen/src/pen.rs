//! Debounced pen on/off state.
//!
//! A held pinch spans tens of frames, so the pen only flips when at least
//! `debounce` has passed since the previous flip. The cooldown is shared by
//! both directions: turning the pen on also delays the next turn-off.

use std::time::Duration;

use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PenState {
    #[default]
    Off,
    On,
}

impl PenState {
    pub fn is_on(self) -> bool { self == PenState::On }

    pub fn toggled(self) -> Self {
        match self {
            PenState::Off => PenState::On,
            PenState::On  => PenState::Off,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PenStateMachine {
    state:       PenState,
    /// `None` until the first toggle, so the very first pinch takes effect.
    last_toggle: Option<Duration>,
    debounce:    Duration,
}

impl PenStateMachine {
    pub fn new(debounce: Duration) -> Self {
        PenStateMachine { state: PenState::Off, last_toggle: None, debounce }
    }

    pub fn state(&self) -> PenState { self.state }
    pub fn last_toggle(&self) -> Option<Duration> { self.last_toggle }
    pub fn debounce(&self) -> Duration { self.debounce }

    /// Feed one frame. Returns `true` if the pen flipped.
    ///
    /// `now` must be monotonic; a timestamp earlier than the last toggle
    /// never toggles.
    pub fn update(&mut self, pinched: bool, now: Duration) -> bool {
        if !pinched {
            return false;
        }
        let cooled = match self.last_toggle {
            None       => true,
            Some(last) => now.checked_sub(last).map_or(false, |dt| dt >= self.debounce),
        };
        if !cooled {
            return false;
        }
        self.state = self.state.toggled();
        self.last_toggle = Some(now);
        debug!(state = ?self.state, at_ms = now.as_millis() as u64, "pen toggled");
        true
    }

    /// Turn the pen off without touching the cooldown.
    pub fn force_off(&mut self) {
        self.state = PenState::Off;
    }
}
