//! Button sampling and edge detection.
//!
//! There is no hardware debounce. A button produces one logical input on the
//! tick where it goes from released to pressed; holding it produces nothing
//! further until it is released and pressed again.

use crate::hardware::{HardwarePort, NUM_BUTTONS};

/// Current and previous-tick state of every button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub current: [bool; NUM_BUTTONS],
    pub previous: [bool; NUM_BUTTONS],
}

impl ButtonState {
    pub fn new(current: [bool; NUM_BUTTONS], previous: [bool; NUM_BUTTONS]) -> Self {
        Self { current, previous }
    }

    #[inline]
    pub fn is_held(&self, index: usize) -> bool {
        self.current[index]
    }

    #[inline]
    pub fn pressed_edge(&self, index: usize) -> bool {
        self.current[index] && !self.previous[index]
    }

    /// Lowest-indexed button that was pressed this tick.
    ///
    /// Games that take one discrete input per tick use this; a second button
    /// pressed in the same tick is dropped.
    pub fn first_press_edge(&self) -> Option<usize> {
        (0..NUM_BUTTONS).find(|&i| self.pressed_edge(i))
    }

    /// Bit `i` set when button `i` is currently held.
    pub fn held_mask(&self) -> u8 {
        self.current
            .iter()
            .enumerate()
            .fold(0u8, |m, (i, &held)| if held { m | (1 << i) } else { m })
    }
}

/// Reads all button lines once per tick and remembers the last reading.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    last: [bool; NUM_BUTTONS],
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample<P: HardwarePort + ?Sized>(&mut self, port: &mut P) -> ButtonState {
        let mut current = [false; NUM_BUTTONS];
        for (i, slot) in current.iter_mut().enumerate() {
            *slot = port.read_button(i);
        }
        let state = ButtonState::new(current, self.last);
        self.last = current;
        state
    }
}
