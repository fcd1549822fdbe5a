//! Virtual board for running without GPIO.
//!
//! Button lines are atomics that connection tasks flip on `PressButton`; the
//! scheduler samples them once per tick exactly as it would sample pins. A
//! press also sets a latch that holds until the next sample, so a tap that is
//! released within one tick still reads as pressed once. LED writes are only
//! logged.

use gamehub::{CommandError, HardwarePort, NUM_BUTTONS, NUM_LEDS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct Lines {
    held: [AtomicBool; NUM_BUTTONS],
    tapped: [AtomicBool; NUM_BUTTONS],
}

#[derive(Debug, Clone, Default)]
pub struct ButtonPanel {
    lines: Arc<Lines>,
}

impl ButtonPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, button: i64, pressed: bool) -> Result<(), CommandError> {
        let i = usize::try_from(button)
            .ok()
            .filter(|&i| i < NUM_BUTTONS)
            .ok_or(CommandError::InvalidButton(button))?;
        if pressed {
            self.lines.tapped[i].store(true, Ordering::Release);
        }
        self.lines.held[i].store(pressed, Ordering::Release);
        Ok(())
    }

    /// Whether the line is held right now, ignoring any pending tap.
    pub fn is_held(&self, index: usize) -> bool {
        self.lines.held[index].load(Ordering::Acquire)
    }

    /// Read the line for one sample: held, or pressed since the last sample.
    /// Consumes the tap.
    pub fn sample(&self, index: usize) -> bool {
        let tapped = self.lines.tapped[index].swap(false, Ordering::AcqRel);
        tapped || self.is_held(index)
    }
}

#[derive(Debug)]
pub struct VirtualBoard {
    panel: ButtonPanel,
    leds: [bool; NUM_LEDS],
}

impl VirtualBoard {
    pub fn new(panel: ButtonPanel) -> Self {
        Self {
            panel,
            leds: [false; NUM_LEDS],
        }
    }
}

impl HardwarePort for VirtualBoard {
    fn read_button(&mut self, index: usize) -> bool {
        self.panel.sample(index)
    }

    fn write_led(&mut self, index: usize, on: bool) {
        if self.leds[index] != on {
            debug!("LED {} {}", index, if on { "on" } else { "off" });
        }
        self.leds[index] = on;
    }
}
