//! Demo command set
//!
//! The commands of the console demo firmware, written against small
//! capability traits so the same handlers run on any board and on the host.

pub mod commands;

pub use commands::{register_all, DEMO_COMMANDS, VERSION};

/// Status LED
pub trait Led {
    fn set(&mut self, on: bool);
    fn toggle(&mut self);
}

/// "Reboot now", implemented once per target
pub trait Reboot {
    /// Restart the system. On hardware this does not return.
    fn reboot(&mut self);
}

/// Operational mode of the LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    /// Held at whatever `led 0` / `led 1` set
    Static,
    /// Toggled by the main loop
    Blink,
}

/// Handler context for the demo commands
pub struct DemoContext<'p> {
    led_mode: LedMode,
    led: &'p mut dyn Led,
    reboot: &'p mut dyn Reboot,
}

impl<'p> DemoContext<'p> {
    /// Starts in blink mode
    pub fn new(led: &'p mut dyn Led, reboot: &'p mut dyn Reboot) -> Self {
        Self {
            led_mode: LedMode::Blink,
            led,
            reboot,
        }
    }

    pub fn led_mode(&self) -> LedMode {
        self.led_mode
    }

    /// Toggle the LED if it is in blink mode. Called by the main loop.
    pub fn blink(&mut self) {
        if self.led_mode == LedMode::Blink {
            self.led.toggle();
        }
    }
}
