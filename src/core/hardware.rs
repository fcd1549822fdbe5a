//! Hardware boundary: six buttons in, six LEDs out.
//!
//! The engine is generic over [`HardwarePort`], so the same game code drives
//! GPIO pins on a board, the daemon's virtual panel, or [`MemoryPort`] in tests.

/// Number of buttons on the board.
pub const NUM_BUTTONS: usize = 6;
/// Number of LEDs on the board.
pub const NUM_LEDS: usize = 6;

/// Abstract button/LED capability.
///
/// Indices are always in `0..NUM_BUTTONS` / `0..NUM_LEDS`; callers validate
/// before reaching the port.
pub trait HardwarePort {
    /// Logical "pressed" state of button `index` (active-low wiring is the
    /// port's concern).
    fn read_button(&mut self, index: usize) -> bool;

    fn write_led(&mut self, index: usize, on: bool);
}

/// Output state of all LEDs, owned by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedState(pub [bool; NUM_LEDS]);

impl LedState {
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.0[index]
    }

    pub fn as_array(&self) -> [bool; NUM_LEDS] {
        self.0
    }

    /// Bitmask with bit `i` set when LED `i` is lit.
    pub fn mask(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0u8, |m, (i, &on)| if on { m | (1 << i) } else { m })
    }

    pub fn any_lit(&self) -> bool {
        self.0.iter().any(|&on| on)
    }
}

/// In-memory port: buttons are set directly, LED writes are recorded.
#[derive(Debug, Clone, Default)]
pub struct MemoryPort {
    pub buttons: [bool; NUM_BUTTONS],
    pub leds: [bool; NUM_LEDS],
    pub led_writes: usize,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, index: usize, pressed: bool) {
        self.buttons[index] = pressed;
    }

    /// Hold exactly the buttons whose bits are set in `mask`.
    pub fn hold_mask(&mut self, mask: u8) {
        for (i, b) in self.buttons.iter_mut().enumerate() {
            *b = mask & (1 << i) != 0;
        }
    }

    pub fn release_all(&mut self) {
        self.buttons = [false; NUM_BUTTONS];
    }
}

impl HardwarePort for MemoryPort {
    fn read_button(&mut self, index: usize) -> bool {
        self.buttons[index]
    }

    fn write_led(&mut self, index: usize, on: bool) {
        self.leds[index] = on;
        self.led_writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_mask_matches_bits() {
        let leds = LedState([true, false, true, false, false, true]);
        assert_eq!(leds.mask(), 0b100101);
        assert!(leds.any_lit());
        assert!(!LedState::default().any_lit());
    }

    #[test]
    fn hold_mask_sets_exact_buttons() {
        let mut port = MemoryPort::new();
        port.hold_mask(0b010011);
        assert_eq!(port.buttons, [true, true, false, false, true, false]);
        port.release_all();
        assert_eq!(port.buttons, [false; NUM_BUTTONS]);
    }
}
