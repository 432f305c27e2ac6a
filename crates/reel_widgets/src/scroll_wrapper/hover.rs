//! Hover pause controller

use super::driver::AnimationDriver;

/// Pauses auto-scroll while the pointer is over the wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverPause {
    pub pause_on_hover: bool,
    pub auto_scroll: bool,
}

impl HoverPause {
    pub fn on_pointer_enter(self, driver: &mut AnimationDriver) {
        if self.pause_on_hover {
            driver.stop();
        }
    }

    /// Resume, subject to the driver's own start guard
    pub fn on_pointer_leave(self, driver: &mut AnimationDriver, needs_scroll: bool) {
        if self.pause_on_hover && self.auto_scroll {
            driver.start(needs_scroll, self.auto_scroll);
        }
    }
}
